//! Persistence contracts and adapters for the drydock engine.
//!
//! Two stores with deliberately different execution models:
//!
//! - [`BaselineStore`] (async): the durable home of the committed
//!   baseline. Fetched once at bootstrap, written on commit.
//! - [`StageStore`] (sync): a single named slot holding the serialized
//!   staged document. The synchronizer writes it in-line after every
//!   staged mutation and must not suspend, so this trait is blocking.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

mod file;
mod memory;

pub use file::{FileBaseline, FileStageStore};
pub use memory::{MemoryBaseline, MemoryStageStore};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backend refused or could not complete the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Durable home of the committed baseline document.
///
/// The payload is `{"features": [...]}`; the scalar `count` is never
/// part of the baseline schema.
#[async_trait]
pub trait BaselineStore: Send + Sync {
    /// Fetch the current baseline payload.
    async fn fetch(&self) -> Result<Value, StoreError>;

    /// Replace the baseline payload.
    async fn publish(&self, baseline: &Value) -> Result<(), StoreError>;
}

/// One named slot holding the full serialized staged document.
///
/// The slot is cleared whenever the staged document is made equal to the
/// committed one (post-commit, post-rollback), so a stale copy cannot
/// resurrect on the next load.
pub trait StageStore: Send + Sync {
    /// Load the slot. `Ok(None)` means no entry; a malformed entry is a
    /// `Serialization` error and the caller decides whether to discard it.
    fn load(&self) -> Result<Option<Value>, StoreError>;

    /// Overwrite the slot with the given document.
    fn save(&self, doc: &Value) -> Result<(), StoreError>;

    /// Remove the slot entry, if any.
    fn clear(&self) -> Result<(), StoreError>;
}
