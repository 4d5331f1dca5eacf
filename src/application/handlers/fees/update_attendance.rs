//! UpdateAttendanceHandler - Command handler for attendance edits.
//!
//! Applies a batch of edits to the stored record (or to a fresh one when
//! nothing is stored yet) and writes it back with the caller's version.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::fees::{AttendanceRecord, AttendanceStatus, FeeError, Seat};
use crate::domain::foundation::{DomainError, RecordKey, RecordVersion};
use crate::ports::AttendanceRepository;

/// One attendance edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum AttendanceChange {
    AddCommitteeMeeting {
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    MarkCommitteeSeat {
        sequence: u32,
        seat: Seat,
        status: Option<AttendanceStatus>,
    },
    RemoveCommitteeMeeting {
        sequence: u32,
    },
    AddClassMeeting {
        representative_name: String,
        class_name: String,
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    MarkClassMeeting {
        representative_name: String,
        class_name: String,
        sequence: u32,
        status: Option<AttendanceStatus>,
    },
    RemoveClassMeeting {
        representative_name: String,
        class_name: String,
        sequence: u32,
    },
}

impl AttendanceChange {
    fn apply(&self, record: &mut AttendanceRecord) -> Result<(), FeeError> {
        match self {
            AttendanceChange::AddCommitteeMeeting { date } => {
                record.add_committee_meeting(*date);
            }
            AttendanceChange::MarkCommitteeSeat {
                sequence,
                seat,
                status,
            } => record.mark_committee_seat(*sequence, *seat, *status)?,
            AttendanceChange::RemoveCommitteeMeeting { sequence } => {
                record.remove_committee_meeting(*sequence)?;
            }
            AttendanceChange::AddClassMeeting {
                representative_name,
                class_name,
                date,
            } => {
                record.add_class_meeting(representative_name, class_name, *date);
            }
            AttendanceChange::MarkClassMeeting {
                representative_name,
                class_name,
                sequence,
                status,
            } => record.mark_class_meeting(representative_name, class_name, *sequence, *status)?,
            AttendanceChange::RemoveClassMeeting {
                representative_name,
                class_name,
                sequence,
            } => {
                record.remove_class_meeting(representative_name, class_name, *sequence)?;
            }
        }
        Ok(())
    }
}

/// Command to edit the attendance of one (representative, class).
#[derive(Debug, Clone)]
pub struct UpdateAttendanceCommand {
    pub key: RecordKey,
    /// `None` creates the record; otherwise the version last read.
    pub expected_version: Option<RecordVersion>,
    pub changes: Vec<AttendanceChange>,
}

#[derive(Debug, Clone)]
pub struct UpdateAttendanceResult {
    pub record: AttendanceRecord,
    pub version: RecordVersion,
}

/// Handler for attendance edits.
pub struct UpdateAttendanceHandler {
    repository: Arc<dyn AttendanceRepository>,
}

impl UpdateAttendanceHandler {
    pub fn new(repository: Arc<dyn AttendanceRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateAttendanceCommand,
    ) -> Result<UpdateAttendanceResult, DomainError> {
        // A stale or missing record is reported by the repository on save.
        let mut record = match self.repository.find(&cmd.key).await? {
            Some(stored) if cmd.expected_version.is_some() => stored.value,
            _ => AttendanceRecord::new(cmd.key.representative_id, cmd.key.class_name.clone()),
        };

        for change in &cmd.changes {
            change.apply(&mut record)?;
        }

        let version = self.repository.save(&record, cmd.expected_version).await?;

        info!(
            key = %cmd.key,
            version = %version,
            changes = cmd.changes.len(),
            "Attendance updated"
        );

        Ok(UpdateAttendanceResult { record, version })
    }
}
