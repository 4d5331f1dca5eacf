//! File-based Record Repository Adapter
//!
//! Stores versioned fee records as YAML files on disk, one file per
//! record kind under `<base>/<representative_id>/<class-slug>/`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::{
    next_version, DomainError, ErrorCode, Keyed, RecordKey, RecordVersion, RepresentativeId,
    Versioned, VersionedRepository,
};

/// File-based storage for one kind of versioned record.
#[derive(Debug)]
pub struct FileRecordRepository<T> {
    base_path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Keyed> FileRecordRepository<T> {
    /// Create a repository rooted at `base_path`.
    ///
    /// # Example
    /// ```ignore
    /// let structures = FileRecordRepository::<FeeStructure>::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    fn representative_dir(&self, representative_id: &RepresentativeId) -> PathBuf {
        self.base_path.join(representative_id.to_string())
    }

    fn record_dir(&self, key: &RecordKey) -> PathBuf {
        let slug = key.class_name.slug();
        let slug = if slug.is_empty() { "_".to_string() } else { slug };
        self.representative_dir(&key.representative_id).join(slug)
    }

    fn record_file_path(&self, key: &RecordKey) -> PathBuf {
        self.record_dir(key).join(format!("{}.yaml", T::KIND))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> DomainError {
    DomainError::new(
        ErrorCode::StorageError,
        format!("I/O error on {}: {}", path.display(), err),
    )
}

async fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<Versioned<T>>, DomainError> {
    if !path.exists() {
        return Ok(None);
    }

    let yaml = fs::read_to_string(path)
        .await
        .map_err(|e| io_error(path, e))?;

    let record = serde_yaml::from_str(&yaml).map_err(|e| {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to deserialize {}: {}", path.display(), e),
        )
    })?;

    Ok(Some(record))
}

impl<T> FileRecordRepository<T>
where
    T: Keyed + DeserializeOwned,
{
    /// Reads the record stored for `key`.
    ///
    /// Two class names can share a slug; a file holding another class's
    /// record is reported separately so writes never clobber it.
    async fn load(&self, key: &RecordKey) -> Result<Lookup<T>, DomainError> {
        match read_record::<T>(&self.record_file_path(key)).await? {
            None => Ok(Lookup::Missing),
            Some(record) if record.value.record_key() == *key => Ok(Lookup::Found(record)),
            Some(record) => Ok(Lookup::Collision(record.value.record_key())),
        }
    }
}

enum Lookup<T> {
    Missing,
    Found(Versioned<T>),
    Collision(RecordKey),
}

#[async_trait]
impl<T> VersionedRepository<T> for FileRecordRepository<T>
where
    T: Keyed + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn find(&self, key: &RecordKey) -> Result<Option<Versioned<T>>, DomainError> {
        match self.load(key).await? {
            Lookup::Found(record) => Ok(Some(record)),
            Lookup::Missing | Lookup::Collision(_) => Ok(None),
        }
    }

    async fn save(
        &self,
        value: &T,
        expected_version: Option<RecordVersion>,
    ) -> Result<RecordVersion, DomainError> {
        let key = value.record_key();
        let _guard = self.write_lock.lock().await;

        let stored = match self.load(&key).await? {
            Lookup::Missing => None,
            Lookup::Found(record) => Some(record.version),
            Lookup::Collision(other) => {
                return Err(DomainError::new(
                    ErrorCode::StorageError,
                    format!("{} for {} shares a storage path with {}", T::KIND, key, other),
                ))
            }
        };
        let version = next_version::<T>(&key, stored, expected_version)?;

        let dir = self.record_dir(&key);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_error(&dir, e))?;

        let yaml = serde_yaml::to_string(&Versioned::new(version, value)).map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to serialize {} for {}: {}", T::KIND, key, e),
            )
        })?;

        let file_path = self.record_file_path(&key);
        fs::write(&file_path, yaml)
            .await
            .map_err(|e| io_error(&file_path, e))?;

        Ok(version)
    }

    async fn list_for_representative(
        &self,
        representative_id: &RepresentativeId,
    ) -> Result<Vec<Versioned<T>>, DomainError> {
        let dir = self.representative_dir(representative_id);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&dir).await.map_err(|e| io_error(&dir, e))?;
        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(&dir, e))? {
            let path = entry.path().join(format!("{}.yaml", T::KIND));
            if let Some(record) = read_record::<T>(&path).await? {
                records.push(record);
            }
        }

        records.sort_by(|a, b| a.value.record_key().class_name.cmp(&b.value.record_key().class_name));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fees::{
        AttendanceRecord, AttendanceStatus, CreditorBand, FeeStructure, SlabLaw,
    };
    use crate::domain::foundation::ClassName;
    use tempfile::TempDir;

    fn class(name: &str) -> ClassName {
        ClassName::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_file_repository_save_and_find() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRecordRepository::<FeeStructure>::new(temp_dir.path());

        let mut value = FeeStructure::slab_based(RepresentativeId::new(), class("Home Buyers"), SlabLaw::Cirp);
        value.select_band(CreditorBand::UpTo1000).unwrap();

        let version = repo.save(&value, None).await.unwrap();
        let found = repo.find(&value.key()).await.unwrap().unwrap();

        assert_eq!(version, RecordVersion::initial());
        assert_eq!(found.value, value);
        assert_eq!(found.value.selected_band(), Some(CreditorBand::UpTo1000));
    }

    #[tokio::test]
    async fn test_file_repository_layout() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRecordRepository::<AttendanceRecord>::new(temp_dir.path());
        let rep = RepresentativeId::new();
        let record = AttendanceRecord::new(rep, class("Home Buyers"));

        repo.save(&record, None).await.unwrap();

        let expected = temp_dir
            .path()
            .join(rep.to_string())
            .join("home-buyers")
            .join("attendance.yaml");
        assert!(expected.exists());
        assert_eq!(repo.record_file_path(&record.key()), expected);
    }

    #[tokio::test]
    async fn test_file_repository_missing_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRecordRepository::<FeeStructure>::new(temp_dir.path());
        let key = RecordKey::new(RepresentativeId::new(), class("Workmen"));

        assert!(repo.find(&key).await.unwrap().is_none());
        assert!(repo.list_for_representative(&key.representative_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_repository_version_conflict() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRecordRepository::<AttendanceRecord>::new(temp_dir.path());
        let mut record = AttendanceRecord::new(RepresentativeId::new(), class("Workmen"));

        let v1 = repo.save(&record, None).await.unwrap();
        let seq = record.add_class_meeting("A. Rao", "Workmen", None);
        record
            .mark_class_meeting("A. Rao", "Workmen", seq, Some(AttendanceStatus::Present))
            .unwrap();
        let v2 = repo.save(&record, Some(v1)).await.unwrap();
        let err = repo.save(&record, Some(v1)).await.unwrap_err();

        assert_eq!(v2.as_u32(), 2);
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
        let stored = repo.find(&record.key()).await.unwrap().unwrap();
        assert_eq!(stored.version, v2);
        assert_eq!(stored.value.present_marks(), 1);
    }

    #[tokio::test]
    async fn test_file_repository_slug_collision_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRecordRepository::<FeeStructure>::new(temp_dir.path());
        let rep = RepresentativeId::new();
        let first = FeeStructure::slab_based(rep, class("Home Buyers"), SlabLaw::Cirp);
        let second = FeeStructure::slab_based(rep, class("home-buyers"), SlabLaw::Cirp);

        repo.save(&first, None).await.unwrap();
        let err = repo.save(&second, None).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(repo.find(&second.key()).await.unwrap().is_none());
        assert!(repo.find(&first.key()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_file_repository_lists_by_class_name() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRecordRepository::<FeeStructure>::new(temp_dir.path());
        let rep = RepresentativeId::new();

        for name in ["Workmen", "Employees", "Home Buyers"] {
            repo.save(&FeeStructure::slab_based(rep, class(name), SlabLaw::Cirp), None)
                .await
                .unwrap();
        }

        let listed = repo.list_for_representative(&rep).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|r| r.value.class_name.as_str()).collect();
        assert_eq!(names, vec!["Employees", "Home Buyers", "Workmen"]);
    }
}
