//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Record Ports
//!
//! - `FeeStructureRepository` - Versioned fee structures per (representative, class)
//! - `AttendanceRepository` - Versioned attendance records per (representative, class)

mod attendance_repository;
mod fee_structure_repository;

pub use attendance_repository::AttendanceRepository;
pub use fee_structure_repository::FeeStructureRepository;
