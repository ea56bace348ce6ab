mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use async_trait::async_trait;

/// Key under which the live reminder-timer handle is persisted.
pub const REMINDER_TIMER_KEY: &str = "notification_timer_id";

/// Key under which the user's goal text is persisted.
pub const GOALS_KEY: &str = "goals";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Internal(String),
}

/// A store for small string values keyed by name, standing in for whatever
/// per-user state the host platform provides.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read a value. Returns `None` if the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write (create or overwrite) a value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. No-op if absent.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// -- Configuration --

/// Configuration for the state store backend.
pub struct StoreConfig {
    /// Base directory for on-disk state. When `None`, use the platform
    /// default data directory.
    pub data_dir: Option<String>,
}

impl StoreConfig {
    /// Build from environment variables (`BRIGHTSIDE_DATA_DIR`).
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("BRIGHTSIDE_DATA_DIR").ok(),
        }
    }
}

// -- Factory --

/// Create a `StateStore` from configuration.
pub fn create_store(config: &StoreConfig) -> Arc<dyn StateStore> {
    Arc::new(FileStore::new(config))
}
