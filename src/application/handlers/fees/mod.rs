//! Fee handlers - compute breakdowns and edit the records they read.

mod compute_fees;
mod configure_structure;
mod update_attendance;

pub use compute_fees::{ComputeFeesHandler, ComputeFeesQuery, ComputeFeesResult};
pub use configure_structure::{
    ConfigureStructureCommand, ConfigureStructureHandler, ConfigureStructureResult,
    StructureChange,
};
pub use update_attendance::{
    AttendanceChange, UpdateAttendanceCommand, UpdateAttendanceHandler, UpdateAttendanceResult,
};
