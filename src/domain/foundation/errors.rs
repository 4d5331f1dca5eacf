//! Shared error vocabulary.
//!
//! `ValidationError` comes out of value-object constructors. Everything
//! that crosses a port or reaches a handler caller is a `DomainError`,
//! identified by a stable `ErrorCode` string.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    EmptyField { field: String },

    #[error("{field} = {actual} is outside {min}..={max}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("{field} is malformed: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::EmptyField { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyField { .. } => ErrorCode::EmptyField,
            Self::OutOfRange { .. } => ErrorCode::OutOfRange,
            Self::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }
}

/// Stable machine-readable error identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Lookup
    FeeStructureNotFound,
    AttendanceRecordNotFound,
    MeetingNotFound,

    // Fee configuration
    UnknownCreditorBand,
    MissingCreditorBand,
    MissingSlabTable,
    RegimeMismatch,
    AmountOverflow,

    // Persistence
    ConcurrencyConflict,
    RecordExists,
    StorageError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::FeeStructureNotFound => "FEE_STRUCTURE_NOT_FOUND",
            ErrorCode::AttendanceRecordNotFound => "ATTENDANCE_RECORD_NOT_FOUND",
            ErrorCode::MeetingNotFound => "MEETING_NOT_FOUND",
            ErrorCode::UnknownCreditorBand => "UNKNOWN_CREDITOR_BAND",
            ErrorCode::MissingCreditorBand => "MISSING_CREDITOR_BAND",
            ErrorCode::MissingSlabTable => "MISSING_SLAB_TABLE",
            ErrorCode::RegimeMismatch => "REGIME_MISMATCH",
            ErrorCode::AmountOverflow => "AMOUNT_OVERFLOW",
            ErrorCode::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            ErrorCode::RecordExists => "RECORD_EXISTS",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// True when retrying after a fresh read may succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ErrorCode::ConcurrencyConflict | ErrorCode::RecordExists)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error carried across ports and returned by handlers.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    /// Free-form context, e.g. `field` or `expected_version`.
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        DomainError {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// A `VALIDATION_FAILED` error naming the rejected field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::new(err.code(), err.to_string()).with_detail("field", field)
    }
}
