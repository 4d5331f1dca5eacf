//! Base repository trait for versioned fee records.
//!
//! Fee structures and attendance records are stored one per
//! (representative, class) and are never deleted. Every write carries the
//! version the caller last read, so two editors working on the same key
//! cannot silently overwrite each other.
//!
//! # Write Rules
//!
//! | expected_version | stored record | outcome |
//! |------------------|---------------|---------|
//! | `None` | absent | created at version 1 |
//! | `None` | present | `RecordExists` |
//! | `Some(v)` | absent | `NotFound` for the record kind |
//! | `Some(v)` | version == v | stored at v + 1 |
//! | `Some(v)` | version != v | `ConcurrencyConflict` |

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{DomainError, ErrorCode, RecordKey, RecordVersion, RepresentativeId};

/// A record that is stored under a `RecordKey`.
pub trait Keyed {
    /// Short name used in storage paths and error messages.
    const KIND: &'static str;

    /// Error code returned when an update targets a missing record.
    const NOT_FOUND: ErrorCode;

    fn record_key(&self) -> RecordKey;
}

/// A stored value together with its concurrency token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub version: RecordVersion,
    pub value: T,
}

impl<T> Versioned<T> {
    pub fn new(version: RecordVersion, value: T) -> Self {
        Self { version, value }
    }
}

/// Storage contract for one kind of versioned record.
#[async_trait]
pub trait VersionedRepository<T>: Send + Sync
where
    T: Keyed + Send + Sync,
{
    /// Returns `Ok(None)` if nothing is stored under `key`.
    async fn find(&self, key: &RecordKey) -> Result<Option<Versioned<T>>, DomainError>;

    /// Writes `value` following the write rules above and returns the new version.
    async fn save(
        &self,
        value: &T,
        expected_version: Option<RecordVersion>,
    ) -> Result<RecordVersion, DomainError>;

    /// Every record stored for a representative, ordered by class name.
    async fn list_for_representative(
        &self,
        representative_id: &RepresentativeId,
    ) -> Result<Vec<Versioned<T>>, DomainError>;
}

/// Applies the write rules to the currently stored version.
///
/// Adapters call this while holding their write lock.
pub fn next_version<T: Keyed>(
    key: &RecordKey,
    stored: Option<RecordVersion>,
    expected: Option<RecordVersion>,
) -> Result<RecordVersion, DomainError> {
    match (stored, expected) {
        (None, None) => Ok(RecordVersion::initial()),
        (Some(_), None) => Err(DomainError::new(
            ErrorCode::RecordExists,
            format!("{} already exists for {}", T::KIND, key),
        )),
        (None, Some(_)) => Err(DomainError::new(
            T::NOT_FOUND,
            format!("{} not found for {}", T::KIND, key),
        )),
        (Some(stored), Some(expected)) if stored == expected => Ok(stored.increment()),
        (Some(stored), Some(expected)) => Err(DomainError::new(
            ErrorCode::ConcurrencyConflict,
            format!(
                "{} version mismatch for {}: expected {}, found {}",
                T::KIND,
                key,
                expected,
                stored
            ),
        )
        .with_detail("expected_version", expected.as_u32().to_string())
        .with_detail("actual_version", stored.as_u32().to_string())),
    }
}
