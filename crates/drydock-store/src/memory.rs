//! In-memory store adapters, primarily for tests.

use crate::{BaselineStore, StageStore, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Baseline document held in memory.
///
/// Fetch and publish can be toggled to fail, which lets tests exercise
/// fatal-bootstrap and rejected-commit handling.
pub struct MemoryBaseline {
    doc: Mutex<Value>,
    fail_fetch: AtomicBool,
    fail_publish: AtomicBool,
}

impl MemoryBaseline {
    /// Create a baseline holding the given payload.
    pub fn new(initial: Value) -> Self {
        Self {
            doc: Mutex::new(initial),
            fail_fetch: AtomicBool::new(false),
            fail_publish: AtomicBool::new(false),
        }
    }

    /// Make subsequent `fetch` calls fail.
    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `publish` calls fail.
    pub fn set_fail_publish(&self, fail: bool) {
        self.fail_publish.store(fail, Ordering::SeqCst);
    }

    /// Clone the currently stored payload.
    pub fn snapshot(&self) -> Value {
        self.doc.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaselineStore for MemoryBaseline {
    async fn fetch(&self) -> Result<Value, StoreError> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("baseline fetch refused".into()));
        }
        Ok(self.doc.lock().unwrap().clone())
    }

    async fn publish(&self, baseline: &Value) -> Result<(), StoreError> {
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("baseline publish refused".into()));
        }
        *self.doc.lock().unwrap() = baseline.clone();
        Ok(())
    }
}

/// Stage slot held in memory as a serialized string.
///
/// Storing the serialized form (rather than a `Value`) lets tests plant
/// malformed entries with [`MemoryStageStore::seed_raw`].
#[derive(Default)]
pub struct MemoryStageStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStageStore {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant a raw (possibly malformed) entry in the slot.
    pub fn seed_raw(&self, raw: impl Into<String>) {
        *self.slot.lock().unwrap() = Some(raw.into());
    }

    /// Inspect the raw slot contents.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }
}

impl StageStore for MemoryStageStore {
    fn load(&self) -> Result<Option<Value>, StoreError> {
        match &*self.slot.lock().unwrap() {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    fn save(&self, doc: &Value) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(doc).map_err(|e| StoreError::Serialization(e.to_string()))?;
        *self.slot.lock().unwrap() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
