//! Storage Adapters
//!
//! Implementations of the record repository ports.
//!
//! ## Available Adapters
//!
//! - **FileRecordRepository** - Stores records as YAML files on disk
//! - **InMemoryRecordRepository** - Stores records in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileRecordRepository, InMemoryRecordRepository};
//!
//! // Production: file-based storage
//! let structures = FileRecordRepository::<FeeStructure>::new("./data/fees");
//!
//! // Testing: in-memory storage
//! let attendance = InMemoryRecordRepository::<AttendanceRecord>::new();
//! ```

mod file_record_repository;
mod in_memory_record_repository;

pub use file_record_repository::FileRecordRepository;
pub use in_memory_record_repository::InMemoryRecordRepository;

use std::path::Path;
use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig, ValidationError};
use crate::domain::fees::{AttendanceRecord, FeeStructure};
use crate::ports::{AttendanceRepository, FeeStructureRepository};

/// The pair of repositories the fee handlers need.
#[derive(Clone)]
pub struct RecordStores {
    pub structures: Arc<dyn FeeStructureRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
}

impl RecordStores {
    pub fn in_memory() -> Self {
        Self {
            structures: Arc::new(InMemoryRecordRepository::<FeeStructure>::new()),
            attendance: Arc::new(InMemoryRecordRepository::<AttendanceRecord>::new()),
        }
    }

    /// Both record kinds share one directory tree; file names keep them apart.
    pub fn file(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            structures: Arc::new(FileRecordRepository::<FeeStructure>::new(data_dir)),
            attendance: Arc::new(FileRecordRepository::<AttendanceRecord>::new(data_dir)),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, ValidationError> {
        match (config.backend, &config.data_dir) {
            (StorageBackend::Memory, _) => Ok(Self::in_memory()),
            (StorageBackend::File, Some(dir)) => Ok(Self::file(dir)),
            (StorageBackend::File, None) => {
                Err(ValidationError::MissingRequired("storage.data_dir"))
            }
        }
    }
}
