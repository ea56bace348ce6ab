use std::path::PathBuf;

use async_trait::async_trait;

use crate::{StateStore, StoreConfig, StoreError};

/// One file per key under a base directory. Values are small (a goal string,
/// a timer handle), so no locking or atomic-rename dance is needed.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(config: &StoreConfig) -> Self {
        let base_dir = config
            .data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn resolve(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

fn default_data_dir() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("brightside")
}

#[async_trait]
impl StateStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.resolve(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Internal(format!(
                "read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.resolve(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Internal(format!("mkdir: {e}")))?;
        }
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| StoreError::Internal(format!("write {}: {e}", path.display())))
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.resolve(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Internal(format!(
                "remove {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(dir: &std::path::Path) -> FileStore {
        let config = StoreConfig {
            data_dir: Some(dir.to_string_lossy().to_string()),
        };
        FileStore::new(&config)
    }

    #[tokio::test]
    async fn set_then_get_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        store.set("goals", "run 5k").await.unwrap();
        let value = store.get("goals").await.unwrap();
        assert_eq!(value.as_deref(), Some("run 5k"));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        assert!(store.get("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_overwrites_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        store.set("key", "first").await.unwrap();
        store.set("key", "second").await.unwrap();

        assert_eq!(store.get("key").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn remove_deletes_value() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        store.set("key", "data").await.unwrap();
        store.remove("key").await.unwrap();
        assert!(store.get("key").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_missing_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        store.remove("nonexistent").await.unwrap();
    }

    #[tokio::test]
    async fn unicode_content_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        let content = "apprendre le français, 日本語を勉強する 🎯";
        store.set("goals", content).await.unwrap();
        assert_eq!(store.get("goals").await.unwrap().as_deref(), Some(content));
    }
}
