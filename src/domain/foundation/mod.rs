//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the fee domain.

mod errors;
mod ids;
mod money;
mod percentage;
mod repository;
mod version;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{class_key, ClassName, RecordKey, RepresentativeId};
pub use money::Money;
pub use percentage::Percentage;
pub use repository::{next_version, Keyed, Versioned, VersionedRepository};
pub use version::RecordVersion;
