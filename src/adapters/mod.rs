//! Adapters - Implementations of port interfaces.
//!
//! - `storage` - In-memory and YAML-file record repositories
//! - `snapshot` - Snapshot file loading for one-off computations

pub mod snapshot;
pub mod storage;

pub use snapshot::{FeeSnapshot, SnapshotError, SnapshotFormat};
pub use storage::{FileRecordRepository, InMemoryRecordRepository, RecordStores};
