//! Optimistic-concurrency token for persisted records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic record version. The first stored version is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordVersion(u32);

impl RecordVersion {
    pub fn initial() -> Self {
        Self(1)
    }

    /// Returns `None` for 0, which is never a stored version.
    pub fn from_u32(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn increment(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RecordVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
