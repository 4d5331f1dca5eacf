//! In-Memory Record Repository Adapter
//!
//! Stores versioned fee records in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    next_version, DomainError, Keyed, RecordKey, RecordVersion, RepresentativeId, Versioned,
    VersionedRepository,
};

/// In-memory storage for one kind of versioned record.
#[derive(Debug)]
pub struct InMemoryRecordRepository<T> {
    records: Arc<RwLock<HashMap<RecordKey, Versioned<T>>>>,
}

impl<T> InMemoryRecordRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored records (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

impl<T> Clone for InMemoryRecordRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Default for InMemoryRecordRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> VersionedRepository<T> for InMemoryRecordRepository<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    async fn find(&self, key: &RecordKey) -> Result<Option<Versioned<T>>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn save(
        &self,
        value: &T,
        expected_version: Option<RecordVersion>,
    ) -> Result<RecordVersion, DomainError> {
        let key = value.record_key();
        let mut records = self.records.write().await;
        let stored = records.get(&key).map(|r| r.version);
        let version = next_version::<T>(&key, stored, expected_version)?;
        records.insert(key, Versioned::new(version, value.clone()));
        Ok(version)
    }

    async fn list_for_representative(
        &self,
        representative_id: &RepresentativeId,
    ) -> Result<Vec<Versioned<T>>, DomainError> {
        let records = self.records.read().await;
        let mut matching: Vec<(&RecordKey, &Versioned<T>)> = records
            .iter()
            .filter(|(key, _)| key.representative_id == *representative_id)
            .collect();
        matching.sort_by(|a, b| a.0.class_name.cmp(&b.0.class_name));
        Ok(matching.into_iter().map(|(_, r)| r.clone()).collect())
    }
}
