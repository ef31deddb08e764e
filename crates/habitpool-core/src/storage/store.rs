//! Whole-document persistence.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use super::data_dir;
use super::document::UserData;
use crate::error::{Result, StoreError};

/// Whole-document read/write. Implementations never perform partial writes.
pub trait Store {
    fn load(&self) -> Result<UserData>;
    fn save(&self, data: &UserData) -> Result<()>;
}

/// Pretty-printed JSON file store.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/userdata.json`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(data_dir()?.join("userdata.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for JsonStore {
    /// Missing file yields an empty document.
    fn load(&self) -> Result<UserData> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no user data yet");
                return Ok(UserData::default());
            }
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        serde_json::from_str(&content).map_err(|source| {
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
            .into()
        })
    }

    fn save(&self, data: &UserData) -> Result<()> {
        let write_failed = |message: String| StoreError::WriteFailed {
            path: self.path.clone(),
            message,
        };
        let json = serde_json::to_string_pretty(data)?;

        // Write beside the target then rename so a crash never leaves half a document
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| write_failed(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| write_failed(e.to_string()))?;

        tracing::info!(
            path = %self.path.display(),
            habits = data.habits.len(),
            completions = data.completions.len(),
            "user data saved"
        );
        Ok(())
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<UserData>,
}

impl MemoryStore {
    pub fn new(data: UserData) -> Self {
        Self {
            data: RefCell::new(data),
        }
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<UserData> {
        Ok(self.data.borrow().clone())
    }

    fn save(&self, data: &UserData) -> Result<()> {
        *self.data.borrow_mut() = data.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::habits::Habit;

    #[test]
    fn test_missing_file_is_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("userdata.json"));
        assert_eq!(store.load().unwrap(), UserData::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("userdata.json"));
        let mut doc = UserData::default();
        doc.add_habit(Habit::new("Stretch")).unwrap();
        doc.unlock_milestone(3);
        store.save(&doc).unwrap();

        assert_eq!(store.load().unwrap(), doc);
        assert!(!dir.path().join("userdata.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userdata.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonStore::new(&path).load().unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::default();
        let mut doc = store.load().unwrap();
        doc.lifetime_completions = 4;
        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap().lifetime_completions, 4);
    }
}
