//! Fee structure configured per (representative, class).
//!
//! The active fee regime is a tagged variant: a slab-based law can only
//! carry a slab config, and an event/periodic/fixed law can only carry
//! scheduled fees. Mixing the two is unrepresentable.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    check_amount, default_slab_table, statutory_range, CreditorBand, FeeError, LawType,
    LegalRange, RangeCheck, RangeWarning, ScheduledLaw, SlabConfig, SlabLaw,
};
use crate::domain::foundation::{ClassName, ErrorCode, Keyed, Money, RecordKey, RepresentativeId};

/// How a non-slab structure is described to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureMode {
    #[default]
    EventBased,
    Periodic,
    FixedLumpSum,
    Mixed,
}

/// Event that makes an event fee line chargeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTrigger {
    MeetingCreated,
    AttendanceMarked,
    ApprovalGranted,
    ResolutionPassed,
}

impl EventTrigger {
    pub const ALL: [EventTrigger; 4] = [
        EventTrigger::MeetingCreated,
        EventTrigger::AttendanceMarked,
        EventTrigger::ApprovalGranted,
        EventTrigger::ResolutionPassed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventTrigger::MeetingCreated => "Meeting Created",
            EventTrigger::AttendanceMarked => "Attendance Marked",
            EventTrigger::ApprovalGranted => "Approval Granted",
            EventTrigger::ResolutionPassed => "Resolution Passed",
        }
    }
}

impl fmt::Display for EventTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFeeLine {
    pub trigger: EventTrigger,
    pub amount: Money,
    /// Overrides the statutory range for this line when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_range: Option<LegalRange>,
}

impl EventFeeLine {
    pub fn new(trigger: EventTrigger, amount: Money) -> Self {
        Self {
            trigger,
            amount,
            legal_range: None,
        }
    }

    pub fn with_range(mut self, range: LegalRange) -> Self {
        self.legal_range = Some(range);
        self
    }

    /// Checks the amount against this line's own range, else the statutory one.
    pub fn check(&self, law: LawType) -> RangeCheck {
        let range = self.legal_range.or_else(|| statutory_range(law, self.trigger));
        check_amount(range, self.trigger, self.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Monthly,
    Quarterly,
    HalfYearly,
    Annually,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicFee {
    pub recurrence: Recurrence,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedFee {
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Event, periodic, and fixed fees for a non-slab law.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduledFees {
    #[serde(default)]
    pub mode: StructureMode,
    #[serde(default)]
    pub events: Vec<EventFeeLine>,
    #[serde(default)]
    pub periodic: Vec<PeriodicFee>,
    #[serde(default)]
    pub fixed: Option<FixedFee>,
}

/// The active fee regime, tagged by `regime` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "regime", rename_all = "snake_case")]
pub enum FeeRegime {
    SlabBased {
        law: SlabLaw,
        /// `None` falls back to the law's statutory table.
        #[serde(default)]
        slab: Option<SlabConfig>,
    },
    Scheduled {
        law: ScheduledLaw,
        #[serde(default)]
        fees: ScheduledFees,
    },
}

impl FeeRegime {
    pub fn law_type(&self) -> LawType {
        match self {
            FeeRegime::SlabBased { law, .. } => (*law).into(),
            FeeRegime::Scheduled { law, .. } => (*law).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeStructure {
    pub representative_id: RepresentativeId,
    pub class_name: ClassName,
    pub regime: FeeRegime,
}

impl FeeStructure {
    /// Creates a slab-based structure using the law's statutory table.
    pub fn slab_based(
        representative_id: RepresentativeId,
        class_name: ClassName,
        law: SlabLaw,
    ) -> Self {
        Self {
            representative_id,
            class_name,
            regime: FeeRegime::SlabBased { law, slab: None },
        }
    }

    pub fn scheduled(
        representative_id: RepresentativeId,
        class_name: ClassName,
        law: ScheduledLaw,
        fees: ScheduledFees,
    ) -> Self {
        Self {
            representative_id,
            class_name,
            regime: FeeRegime::Scheduled { law, fees },
        }
    }

    pub fn with_slab(mut self, config: SlabConfig) -> Self {
        if let FeeRegime::SlabBased { slab, .. } = &mut self.regime {
            *slab = Some(config);
        }
        self
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.representative_id, self.class_name.clone())
    }

    pub fn law_type(&self) -> LawType {
        self.regime.law_type()
    }

    pub fn is_slab_based(&self) -> bool {
        matches!(self.regime, FeeRegime::SlabBased { .. })
    }

    /// The band selected in the slab config, if any.
    pub fn selected_band(&self) -> Option<CreditorBand> {
        match &self.regime {
            FeeRegime::SlabBased { slab, .. } => slab.as_ref().and_then(|s| s.selected_band),
            FeeRegime::Scheduled { .. } => None,
        }
    }

    /// Selects the creditor band for this class.
    ///
    /// A structure still on the statutory table gets a copy of it so the
    /// selection can be stored.
    pub fn select_band(&mut self, band: CreditorBand) -> Result<(), FeeError> {
        let law = self.law_type();
        match &mut self.regime {
            FeeRegime::SlabBased { law: slab_law, slab } => {
                let config = slab.get_or_insert_with(|| default_slab_table(*slab_law).clone());
                config.selected_band = Some(band);
                Ok(())
            }
            FeeRegime::Scheduled { .. } => Err(FeeError::RegimeMismatch {
                law,
                operation: "selecting a creditor band",
            }),
        }
    }

    /// Out-of-range event amounts, in line order. Always empty for slab laws.
    pub fn range_warnings(&self) -> Vec<RangeWarning> {
        let law = self.law_type();
        self.scheduled_fees()
            .map(|fees| {
                fees.events
                    .iter()
                    .filter_map(|line| line.check(law).into_warning())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn scheduled_fees(&self) -> Option<&ScheduledFees> {
        match &self.regime {
            FeeRegime::Scheduled { fees, .. } => Some(fees),
            FeeRegime::SlabBased { .. } => None,
        }
    }

    fn scheduled_fees_mut(&mut self, operation: &'static str) -> Result<&mut ScheduledFees, FeeError> {
        let law = self.law_type();
        match &mut self.regime {
            FeeRegime::Scheduled { fees, .. } => Ok(fees),
            FeeRegime::SlabBased { .. } => Err(FeeError::RegimeMismatch { law, operation }),
        }
    }

    pub fn add_event_line(&mut self, line: EventFeeLine) -> Result<usize, FeeError> {
        let fees = self.scheduled_fees_mut("adding an event fee")?;
        fees.events.push(line);
        Ok(fees.events.len() - 1)
    }

    pub fn set_event_amount(&mut self, index: usize, amount: Money) -> Result<(), FeeError> {
        let fees = self.scheduled_fees_mut("editing an event fee")?;
        let line = fees
            .events
            .get_mut(index)
            .ok_or(FeeError::EventLineNotFound(index))?;
        line.amount = amount;
        Ok(())
    }

    pub fn remove_event_line(&mut self, index: usize) -> Result<EventFeeLine, FeeError> {
        let fees = self.scheduled_fees_mut("removing an event fee")?;
        if index >= fees.events.len() {
            return Err(FeeError::EventLineNotFound(index));
        }
        Ok(fees.events.remove(index))
    }

    pub fn add_periodic_fee(&mut self, fee: PeriodicFee) -> Result<(), FeeError> {
        self.scheduled_fees_mut("adding a periodic fee")?.periodic.push(fee);
        Ok(())
    }

    pub fn set_fixed_fee(&mut self, fee: Option<FixedFee>) -> Result<(), FeeError> {
        self.scheduled_fees_mut("setting a fixed fee")?.fixed = fee;
        Ok(())
    }
}

impl Keyed for FeeStructure {
    const KIND: &'static str = "fee_structure";
    const NOT_FOUND: ErrorCode = ErrorCode::FeeStructureNotFound;

    fn record_key(&self) -> RecordKey {
        self.key()
    }
}
