//! Attendance repository port.

use crate::domain::fees::AttendanceRecord;
use crate::domain::foundation::VersionedRepository;

/// Repository port for attendance records.
///
/// Records are saved whole; edits are made on the domain type and written
/// back with the version they were read at.
pub trait AttendanceRepository: VersionedRepository<AttendanceRecord> {}

impl<R> AttendanceRepository for R where R: VersionedRepository<AttendanceRecord> + ?Sized {}
