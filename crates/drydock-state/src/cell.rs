//! Shared mutable document container.
//!
//! `StateCell` wraps a `Mutex<Value>` so a document can be shared between
//! a session, its cursors, and the synchronizer, with writes applied in
//! place so the next read sees the update.

use crate::accessor::{get_at_path, set_at_path};
use crate::{Path, StateResult};
use serde_json::Value;
use std::sync::Mutex;

/// Shared mutable JSON document.
pub struct StateCell(Mutex<Value>);

impl StateCell {
    /// Create a new cell with the given initial document.
    pub fn new(value: Value) -> Self {
        Self(Mutex::new(value))
    }

    /// Clone the current document.
    pub fn snapshot(&self) -> Value {
        self.0.lock().unwrap().clone()
    }

    /// Clone the value at `path`, or `None` if absent.
    pub fn read(&self, path: &Path) -> Option<Value> {
        let guard = self.0.lock().unwrap();
        get_at_path(&guard, path).cloned()
    }

    /// Write `value` at `path` in place.
    ///
    /// The empty path swaps the root's contents while keeping the cell
    /// (and, for object roots, the map) as the same container.
    pub fn write(&self, path: &Path, value: Value) -> StateResult<()> {
        let mut guard = self.0.lock().unwrap();
        set_at_path(&mut guard, path, value)
    }

    /// Consume the cell and return the inner document.
    pub fn into_inner(self) -> Value {
        self.0.into_inner().unwrap()
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new(Value::Object(Default::default()))
    }
}

impl Clone for StateCell {
    fn clone(&self) -> Self {
        Self::new(self.snapshot())
    }
}

impl std::fmt::Debug for StateCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StateCell").field(&"<Value>").finish()
    }
}
