//! ComputeFeesHandler - Query handler for a (representative, class) fee breakdown.
//!
//! Reads the stored structure and attendance, runs the calculator, and
//! optionally returns the attendance annotated with per-meeting payability.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::fees::{
    annotate, AttendanceRecord, ComputeOptions, CreditorBand, FeeBreakdown, FeeCalculator,
};
use crate::domain::foundation::{DomainError, ErrorCode, RecordKey, RecordVersion};
use crate::ports::{AttendanceRepository, FeeStructureRepository};

/// Query for the fee breakdown of one (representative, class).
#[derive(Debug, Clone)]
pub struct ComputeFeesQuery {
    pub key: RecordKey,
    /// Overrides the structure's selected band.
    pub band: Option<CreditorBand>,
    /// Falls back to the handler's default options.
    pub options: Option<ComputeOptions>,
    /// Also return the attendance with `payable`/`fee` filled in.
    pub annotate: bool,
}

impl ComputeFeesQuery {
    pub fn new(key: RecordKey) -> Self {
        Self {
            key,
            band: None,
            options: None,
            annotate: false,
        }
    }

    pub fn with_band(mut self, band: CreditorBand) -> Self {
        self.band = Some(band);
        self
    }

    pub fn with_options(mut self, options: ComputeOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn annotated(mut self) -> Self {
        self.annotate = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ComputeFeesResult {
    pub breakdown: FeeBreakdown,
    /// Versions the breakdown was computed from.
    pub structure_version: RecordVersion,
    /// `None` when no attendance has been recorded yet.
    pub attendance_version: Option<RecordVersion>,
    /// Present only for annotated slab-based queries.
    pub annotated_attendance: Option<AttendanceRecord>,
}

/// Handler for computing fee breakdowns.
pub struct ComputeFeesHandler {
    structures: Arc<dyn FeeStructureRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    default_options: ComputeOptions,
}

impl ComputeFeesHandler {
    pub fn new(
        structures: Arc<dyn FeeStructureRepository>,
        attendance: Arc<dyn AttendanceRepository>,
    ) -> Self {
        Self {
            structures,
            attendance,
            default_options: ComputeOptions::default(),
        }
    }

    pub fn with_default_options(mut self, options: ComputeOptions) -> Self {
        self.default_options = options;
        self
    }

    pub async fn handle(&self, query: ComputeFeesQuery) -> Result<ComputeFeesResult, DomainError> {
        let structure = self.structures.find(&query.key).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::FeeStructureNotFound,
                format!("No fee structure configured for {}", query.key),
            )
        })?;

        let (attendance, attendance_version) = match self.attendance.find(&query.key).await? {
            Some(stored) => (stored.value, Some(stored.version)),
            None => (
                AttendanceRecord::new(query.key.representative_id, query.key.class_name.clone()),
                None,
            ),
        };

        let options = query.options.unwrap_or(self.default_options);
        let breakdown =
            FeeCalculator::compute(&structure.value, &attendance, query.band, options).map_err(
                |err| {
                    warn!(key = %query.key, error = %err, "Fee computation rejected configuration");
                    DomainError::from(err)
                },
            )?;

        if breakdown.has_warnings() {
            warn!(
                key = %query.key,
                warnings = breakdown.warnings.len(),
                "Fee structure has amounts outside legal ranges"
            );
        }

        let annotated_attendance = if query.annotate && structure.value.is_slab_based() {
            let rates = FeeCalculator::resolve_rates(&structure.value, query.band)?;
            let mut annotated = attendance;
            annotate(&mut annotated, rates, options);
            Some(annotated)
        } else {
            None
        };

        debug!(
            key = %query.key,
            law = %breakdown.law,
            total = %breakdown.total,
            facilitator_fee = %breakdown.facilitator_fee,
            "Computed fee breakdown"
        );

        Ok(ComputeFeesResult {
            breakdown,
            structure_version: structure.version,
            attendance_version,
            annotated_attendance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fees::{
        AttendanceStatus, EventFeeLine, EventTrigger, FeeStructure, ScheduledFees, ScheduledLaw,
        Seat, SlabLaw,
    };
    use crate::domain::foundation::{
        ClassName, Money, RepresentativeId, Versioned, VersionedRepository,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockStructures {
        stored: Mutex<Option<Versioned<FeeStructure>>>,
    }

    impl MockStructures {
        fn with(structure: FeeStructure) -> Self {
            Self {
                stored: Mutex::new(Some(Versioned::new(RecordVersion::initial(), structure))),
            }
        }

        fn empty() -> Self {
            Self {
                stored: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl VersionedRepository<FeeStructure> for MockStructures {
        async fn find(&self, _key: &RecordKey) -> Result<Option<Versioned<FeeStructure>>, DomainError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(
            &self,
            _value: &FeeStructure,
            _expected_version: Option<RecordVersion>,
        ) -> Result<RecordVersion, DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "read-only mock"))
        }

        async fn list_for_representative(
            &self,
            _representative_id: &RepresentativeId,
        ) -> Result<Vec<Versioned<FeeStructure>>, DomainError> {
            Ok(self.stored.lock().unwrap().clone().into_iter().collect())
        }
    }

    struct MockAttendance {
        stored: Option<Versioned<AttendanceRecord>>,
        fail: bool,
    }

    #[async_trait]
    impl VersionedRepository<AttendanceRecord> for MockAttendance {
        async fn find(
            &self,
            _key: &RecordKey,
        ) -> Result<Option<Versioned<AttendanceRecord>>, DomainError> {
            if self.fail {
                return Err(DomainError::new(ErrorCode::StorageError, "Simulated read failure"));
            }
            Ok(self.stored.clone())
        }

        async fn save(
            &self,
            _value: &AttendanceRecord,
            _expected_version: Option<RecordVersion>,
        ) -> Result<RecordVersion, DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "read-only mock"))
        }

        async fn list_for_representative(
            &self,
            _representative_id: &RepresentativeId,
        ) -> Result<Vec<Versioned<AttendanceRecord>>, DomainError> {
            Ok(Vec::new())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn key() -> RecordKey {
        RecordKey::new(RepresentativeId::new(), ClassName::new("Home Buyers").unwrap())
    }

    fn cirp(key: &RecordKey) -> FeeStructure {
        FeeStructure::slab_based(key.representative_id, key.class_name.clone(), SlabLaw::Cirp)
    }

    fn attendance(key: &RecordKey) -> AttendanceRecord {
        let mut record = AttendanceRecord::new(key.representative_id, key.class_name.clone());
        for _ in 0..3 {
            let seq = record.add_committee_meeting(None);
            record
                .mark_committee_seat(seq, Seat::First, Some(AttendanceStatus::Present))
                .unwrap();
            record
                .mark_committee_seat(seq, Seat::Second, Some(AttendanceStatus::Present))
                .unwrap();
        }
        record
    }

    fn handler(structures: MockStructures, attendance: MockAttendance) -> ComputeFeesHandler {
        ComputeFeesHandler::new(Arc::new(structures), Arc::new(attendance))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn computes_from_stored_records() {
        let key = key();
        let handler = handler(
            MockStructures::with(cirp(&key)),
            MockAttendance {
                stored: Some(Versioned::new(RecordVersion::initial(), attendance(&key))),
                fail: false,
            },
        );

        let result = handler
            .handle(ComputeFeesQuery::new(key).with_band(CreditorBand::UpTo1000))
            .await
            .unwrap();

        assert_eq!(result.breakdown.committee.paid, 2);
        assert_eq!(result.breakdown.total, Money::rupees(80_000));
        assert_eq!(result.attendance_version, Some(RecordVersion::initial()));
        assert!(result.annotated_attendance.is_none());
    }

    #[tokio::test]
    async fn default_options_apply_when_query_has_none() {
        let key = key();
        let handler = handler(
            MockStructures::with(cirp(&key)),
            MockAttendance {
                stored: Some(Versioned::new(RecordVersion::initial(), attendance(&key))),
                fail: false,
            },
        )
        .with_default_options(ComputeOptions::charge_per_ar());

        let doubled = handler
            .handle(ComputeFeesQuery::new(key.clone()).with_band(CreditorBand::UpTo1000))
            .await
            .unwrap();
        let single = handler
            .handle(
                ComputeFeesQuery::new(key)
                    .with_band(CreditorBand::UpTo1000)
                    .with_options(ComputeOptions::default()),
            )
            .await
            .unwrap();

        assert_eq!(doubled.breakdown.total, Money::rupees(160_000));
        assert_eq!(single.breakdown.total, Money::rupees(80_000));
    }

    #[tokio::test]
    async fn missing_attendance_computes_zero() {
        let key = key();
        let handler = handler(
            MockStructures::with(cirp(&key)),
            MockAttendance {
                stored: None,
                fail: false,
            },
        );

        let result = handler
            .handle(ComputeFeesQuery::new(key).with_band(CreditorBand::UpTo100))
            .await
            .unwrap();

        assert_eq!(result.breakdown.total, Money::ZERO);
        assert_eq!(result.attendance_version, None);
    }

    #[tokio::test]
    async fn missing_structure_is_not_found() {
        let handler = handler(
            MockStructures::empty(),
            MockAttendance {
                stored: None,
                fail: false,
            },
        );

        let err = handler.handle(ComputeFeesQuery::new(key())).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::FeeStructureNotFound);
    }

    #[tokio::test]
    async fn missing_band_is_a_configuration_error() {
        let key = key();
        let handler = handler(
            MockStructures::with(cirp(&key)),
            MockAttendance {
                stored: None,
                fail: false,
            },
        );

        let err = handler.handle(ComputeFeesQuery::new(key)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::MissingCreditorBand);
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let key = key();
        let handler = handler(
            MockStructures::with(cirp(&key)),
            MockAttendance {
                stored: None,
                fail: true,
            },
        );

        let err = handler
            .handle(ComputeFeesQuery::new(key).with_band(CreditorBand::UpTo100))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
    }

    #[tokio::test]
    async fn annotated_query_marks_first_two_meetings() {
        let key = key();
        let handler = handler(
            MockStructures::with(cirp(&key)),
            MockAttendance {
                stored: Some(Versioned::new(RecordVersion::initial(), attendance(&key))),
                fail: false,
            },
        );

        let result = handler
            .handle(
                ComputeFeesQuery::new(key)
                    .with_band(CreditorBand::UpTo1000)
                    .annotated(),
            )
            .await
            .unwrap();

        let annotated = result.annotated_attendance.unwrap();
        let payable: Vec<Option<bool>> =
            annotated.committee_meetings.iter().map(|m| m.payable).collect();
        assert_eq!(payable, vec![Some(true), Some(true), Some(false)]);
        assert_eq!(annotated.committee_meetings[2].fee, Some(Money::ZERO));
    }

    #[tokio::test]
    async fn scheduled_structure_ignores_annotation_and_reports_warnings() {
        let key = key();
        let structure = FeeStructure::scheduled(
            key.representative_id,
            key.class_name.clone(),
            ScheduledLaw::Sebi,
            ScheduledFees {
                events: vec![EventFeeLine::new(EventTrigger::MeetingCreated, Money::rupees(1_000))],
                ..ScheduledFees::default()
            },
        );
        let handler = handler(
            MockStructures::with(structure),
            MockAttendance {
                stored: None,
                fail: false,
            },
        );

        let result = handler
            .handle(ComputeFeesQuery::new(key).annotated())
            .await
            .unwrap();

        assert!(result.annotated_attendance.is_none());
        assert_eq!(result.breakdown.warnings.len(), 1);
        assert_eq!(result.breakdown.total, Money::rupees(1_000));
    }
}
