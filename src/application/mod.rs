//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Queries (fee computation) are kept apart from commands (record edits).

pub mod handlers;

pub use handlers::{
    AttendanceChange, ComputeFeesHandler, ComputeFeesQuery, ComputeFeesResult,
    ConfigureStructureCommand, ConfigureStructureHandler, ConfigureStructureResult,
    StructureChange, UpdateAttendanceCommand, UpdateAttendanceHandler, UpdateAttendanceResult,
};
