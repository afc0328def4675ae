//! Cursors: the single choke point for document mutation.
//!
//! A cursor is bound at construction to a shared document cell and a path
//! into it. Every observable mutation of the bound document goes through
//! `swap` or `reset`, which lets a write hook (installed by whoever owns
//! the root binding) run after each write without instrumenting call
//! sites individually.

use crate::error::{HookError, StateError, StateResult};
use crate::{Path, StateCell};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Hook invoked after every successful cursor write.
pub type WriteHook = Arc<dyn Fn() -> Result<(), HookError> + Send + Sync>;

/// A read/write handle bound to `(cell, path)`.
///
/// Sub-path cursors created with [`Cursor::at`] share the root cell and
/// the root's write hook, so their writes fire the same trigger.
#[derive(Clone)]
pub struct Cursor {
    cell: Arc<StateCell>,
    path: Path,
    on_write: Option<WriteHook>,
}

impl Cursor {
    /// Create a cursor with no write hook.
    pub fn new(cell: Arc<StateCell>, path: Path) -> Self {
        Self {
            cell,
            path,
            on_write: None,
        }
    }

    /// Create a cursor whose writes fire `hook` after landing.
    pub fn with_hook(cell: Arc<StateCell>, path: Path, hook: WriteHook) -> Self {
        Self {
            cell,
            path,
            on_write: Some(hook),
        }
    }

    /// Narrow this cursor to a sub-path, keeping the cell and hook.
    pub fn at(&self, sub: Path) -> Cursor {
        Cursor {
            cell: Arc::clone(&self.cell),
            path: self.path.join(&sub),
            on_write: self.on_write.clone(),
        }
    }

    /// The path this cursor is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Clone the current value at the bound path, or `None` if absent.
    ///
    /// This reflects live state at call time, not a subscription.
    pub fn read(&self) -> Option<Value> {
        self.cell.read(&self.path)
    }

    /// Read and deserialize the current value, `None` if absent.
    pub fn read_as<T: DeserializeOwned>(&self) -> StateResult<Option<T>> {
        match self.read() {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Apply `update` to the current value and write the result back.
    ///
    /// `update` receives the pre-update value and must return the full
    /// replacement for the bound path. It should be pure; it runs exactly
    /// once per call. Fails with `PathNotFound` if the path is absent.
    pub fn swap<F>(&self, update: F) -> StateResult<()>
    where
        F: FnOnce(Value) -> Value,
    {
        let current = self
            .read()
            .ok_or_else(|| StateError::path_not_found(self.path.clone()))?;
        self.cell.write(&self.path, update(current))?;
        self.fire_hook()
    }

    /// Unconditionally replace the value at the bound path.
    pub fn reset(&self, value: Value) -> StateResult<()> {
        self.cell.write(&self.path, value)?;
        self.fire_hook()
    }

    fn fire_hook(&self) -> StateResult<()> {
        match &self.on_write {
            Some(hook) => hook().map_err(StateError::Hook),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("path", &self.path)
            .field("hooked", &self.on_write.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counted_hook() -> (WriteHook, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let hook: WriteHook = Arc::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        (hook, count)
    }

    #[test]
    fn test_swap_applies_update() {
        let cell = Arc::new(StateCell::new(json!({"count": 1})));
        let cursor = Cursor::new(cell, path!("count"));
        cursor
            .swap(|v| json!(v.as_i64().unwrap_or(0) + 1))
            .unwrap();
        assert_eq!(cursor.read(), Some(json!(2)));
    }

    #[test]
    fn test_swap_absent_path_fails() {
        let cell = Arc::new(StateCell::new(json!({})));
        let cursor = Cursor::new(cell, path!("missing"));
        let err = cursor.swap(|v| v).unwrap_err();
        assert!(matches!(err, StateError::PathNotFound { .. }));
    }

    #[test]
    fn test_reset_replaces_value() {
        let cell = Arc::new(StateCell::new(json!({"count": 7})));
        let cursor = Cursor::new(cell, path!("count"));
        cursor.reset(json!(0)).unwrap();
        assert_eq!(cursor.read(), Some(json!(0)));
    }

    #[test]
    fn test_hook_fires_on_swap_and_reset() {
        let cell = Arc::new(StateCell::new(json!({"count": 0})));
        let (hook, count) = counted_hook();
        let cursor = Cursor::with_hook(cell, Path::root(), hook);

        cursor.at(path!("count")).swap(|_| json!(1)).unwrap();
        cursor.at(path!("count")).reset(json!(2)).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_hook_not_fired_on_failed_write() {
        let cell = Arc::new(StateCell::new(json!({"arr": [1]})));
        let (hook, count) = counted_hook();
        let cursor = Cursor::with_hook(cell, Path::root(), hook);

        let err = cursor.at(path!("arr", 9)).reset(json!(0)).unwrap_err();
        assert!(matches!(err, StateError::IndexOutOfBounds { .. }));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_hook_error_surfaces() {
        let cell = Arc::new(StateCell::new(json!({"x": 1})));
        let hook: WriteHook = Arc::new(|| Err("store offline".into()));
        let cursor = Cursor::with_hook(cell, path!("x"), hook);

        let err = cursor.reset(json!(2)).unwrap_err();
        assert!(matches!(err, StateError::Hook(_)));
        // The write itself landed before the hook ran.
        assert_eq!(cursor.read(), Some(json!(2)));
    }

    #[test]
    fn test_sub_cursor_shares_cell() {
        let cell = Arc::new(StateCell::new(json!({"a": {"b": 1}})));
        let root = Cursor::new(cell, Path::root());
        let sub = root.at(path!("a", "b"));
        sub.reset(json!(5)).unwrap();
        assert_eq!(root.read(), Some(json!({"a": {"b": 5}})));
    }

    #[test]
    fn test_read_as_typed() {
        let cell = Arc::new(StateCell::new(json!({"count": 4})));
        let cursor = Cursor::new(cell, path!("count"));
        assert_eq!(cursor.read_as::<i64>().unwrap(), Some(4));

        let absent = cursor.at(path!("nope"));
        assert_eq!(absent.read_as::<i64>().unwrap(), None);
    }
}
