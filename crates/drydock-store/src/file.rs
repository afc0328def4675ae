//! File-backed store adapters.
//!
//! Both adapters write through a temp file in the target directory and
//! rename over the destination, so readers never observe a partial write.

use crate::{BaselineStore, StageStore, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

fn tmp_sibling(path: &Path) -> PathBuf {
    let stem = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("slot");
    let dir = path.parent().map(PathBuf::from).unwrap_or_default();
    dir.join(format!(".{}.{}.tmp", stem, uuid::Uuid::new_v4().simple()))
}

/// Baseline document stored as a single JSON file.
pub struct FileBaseline {
    path: PathBuf,
}

impl FileBaseline {
    /// Create an adapter reading and writing the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BaselineStore for FileBaseline {
    async fn fetch(&self) -> Result<Value, StoreError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&content).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn publish(&self, baseline: &Value) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(baseline)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }

        let tmp_path = tmp_sibling(&self.path);
        let write_result = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(content.as_bytes()).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            match tokio::fs::rename(&tmp_path, &self.path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tokio::fs::remove_file(&self.path).await?;
                    tokio::fs::rename(&tmp_path, &self.path).await?;
                }
                Err(e) => return Err(e),
            }
            Ok::<(), std::io::Error>(())
        }
        .await;

        if let Err(e) = write_result {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io(e));
        }
        Ok(())
    }
}

/// Staged-document slot stored as a single JSON file.
///
/// All operations are blocking; the slot sits on the synchronizer's
/// in-line write path.
pub struct FileStageStore {
    path: PathBuf,
}

impl FileStageStore {
    /// Create an adapter using the given file as the slot.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StageStore for FileStageStore {
    fn load(&self) -> Result<Option<Value>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn save(&self, doc: &Value) -> Result<(), StoreError> {
        let content =
            serde_json::to_string(doc).map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let tmp_path = tmp_sibling(&self.path);
        let write_result = (|| {
            std::fs::write(&tmp_path, content.as_bytes())?;
            match std::fs::rename(&tmp_path, &self.path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    std::fs::remove_file(&self.path)?;
                    std::fs::rename(&tmp_path, &self.path)?;
                }
                Err(e) => return Err(e),
            }
            Ok::<(), std::io::Error>(())
        })();

        if let Err(e) = write_result {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(StoreError::Io(e));
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn baseline_fetch_publish_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("features.json");
        let store = FileBaseline::new(&path);

        store
            .publish(&json!({"features": [{"id": "1", "name": "A", "description": ""}]}))
            .await
            .unwrap();

        let fetched = store.fetch().await.unwrap();
        assert_eq!(fetched["features"][0]["id"], "1");
    }

    #[tokio::test]
    async fn baseline_fetch_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = FileBaseline::new(dir.path().join("absent.json"));
        assert!(matches!(store.fetch().await, Err(StoreError::Io(_))));
    }

    #[tokio::test]
    async fn baseline_publish_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("features.json");
        let store = FileBaseline::new(&path);

        store.publish(&json!({"features": []})).await.unwrap();
        store
            .publish(&json!({"features": [{"id": "2"}]}))
            .await
            .unwrap();

        let fetched = store.fetch().await.unwrap();
        assert_eq!(fetched["features"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn stage_slot_roundtrip_and_clear() {
        let dir = TempDir::new().unwrap();
        let store = FileStageStore::new(dir.path().join("staged.json"));

        assert!(store.load().unwrap().is_none());

        store.save(&json!({"count": 3, "features": []})).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded["count"], 3);

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing an already-empty slot is fine.
        store.clear().unwrap();
    }

    #[test]
    fn stage_slot_overwrites_prior_entry() {
        let dir = TempDir::new().unwrap();
        let store = FileStageStore::new(dir.path().join("staged.json"));

        store.save(&json!({"count": 1, "features": []})).unwrap();
        store.save(&json!({"count": 2, "features": []})).unwrap();
        assert_eq!(store.load().unwrap().unwrap()["count"], 2);
    }

    #[test]
    fn stage_slot_malformed_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("staged.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStageStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(StoreError::Serialization(_))
        ));
    }
}
