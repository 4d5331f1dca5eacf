//! Fee domain errors.
//!
//! Configuration problems (bands, slab tables) are returned to the caller
//! and never defaulted; a silent zero would under-bill. Range violations
//! are not errors at all - they are warnings on the breakdown.

use thiserror::Error;

use super::LawType;
use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    #[error("Unknown creditor band '{0}'")]
    UnknownCreditorBand(String),

    #[error("No creditor band supplied or selected for a {law} fee structure")]
    MissingCreditorBand { law: LawType },

    #[error("No slab table configured for {law}")]
    MissingSlabTable { law: LawType },

    #[error("{operation} is not available for {law} fee structures")]
    RegimeMismatch {
        law: LawType,
        operation: &'static str,
    },

    #[error("{what} exceeds the largest representable amount")]
    AmountOverflow { what: &'static str },

    #[error("Event fee line {0} not found")]
    EventLineNotFound(usize),

    #[error("Committee meeting #{0} not found")]
    CommitteeMeetingNotFound(u32),

    #[error("Class meeting #{sequence} not found for {representative_name} / {class_name}")]
    ClassMeetingNotFound {
        representative_name: String,
        class_name: String,
        sequence: u32,
    },
}

impl FeeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FeeError::UnknownCreditorBand(_) => ErrorCode::UnknownCreditorBand,
            FeeError::MissingCreditorBand { .. } => ErrorCode::MissingCreditorBand,
            FeeError::MissingSlabTable { .. } => ErrorCode::MissingSlabTable,
            FeeError::RegimeMismatch { .. } => ErrorCode::RegimeMismatch,
            FeeError::AmountOverflow { .. } => ErrorCode::AmountOverflow,
            FeeError::EventLineNotFound(_)
            | FeeError::CommitteeMeetingNotFound(_)
            | FeeError::ClassMeetingNotFound { .. } => ErrorCode::MeetingNotFound,
        }
    }

    /// Returns true for errors caused by fee configuration rather than edits.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FeeError::UnknownCreditorBand(_)
                | FeeError::MissingCreditorBand { .. }
                | FeeError::MissingSlabTable { .. }
                | FeeError::AmountOverflow { .. }
        )
    }
}

impl From<FeeError> for DomainError {
    fn from(err: FeeError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
