//! Snapshot adapter - loads a computation snapshot from a JSON or YAML file.

mod snapshot_file;

pub use snapshot_file::{FeeSnapshot, SnapshotError, SnapshotFormat};
