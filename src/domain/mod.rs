//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, repository contract)
//! - `fees` - Fee structures, attendance, and the fee computation

pub mod fees;
pub mod foundation;
