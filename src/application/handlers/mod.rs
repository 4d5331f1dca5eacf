//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod fees;

pub use fees::{
    // Queries
    ComputeFeesHandler, ComputeFeesQuery, ComputeFeesResult,
    // Commands
    AttendanceChange, UpdateAttendanceCommand, UpdateAttendanceHandler, UpdateAttendanceResult,
    ConfigureStructureCommand, ConfigureStructureHandler, ConfigureStructureResult,
    StructureChange,
};
