//! Error types for state operations.

use crate::Path;
use thiserror::Error;

/// Result type alias for state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Boxed error carried by cursor write hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during state access.
#[derive(Debug, Error)]
pub enum StateError {
    /// The addressed value does not exist.
    #[error("path not found: {path}")]
    PathNotFound {
        /// The path that was not found.
        path: Path,
    },

    /// A write traversed an intermediate node that does not exist.
    ///
    /// Writes never create missing structure; this is a contract error
    /// at the call site.
    #[error("path traversal through missing node at {stopped_at} (writing {path})")]
    PathTraversal {
        /// The full path the write targeted.
        path: Path,
        /// The prefix at which traversal stopped.
        stopped_at: Path,
    },

    /// Array index is out of bounds.
    #[error("index {index} out of bounds (len: {len}) at path {path}")]
    IndexOutOfBounds {
        /// The path to the array.
        path: Path,
        /// The index that was accessed.
        index: usize,
        /// The actual length of the array.
        len: usize,
    },

    /// A segment did not match the shape of the node it addressed.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// The path where the mismatch occurred.
        path: Path,
        /// The expected type.
        expected: &'static str,
        /// The actual type found.
        found: &'static str,
    },

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A cursor write hook reported a failure.
    #[error("write hook failed: {0}")]
    Hook(#[source] HookError),
}

impl StateError {
    /// Create a path not found error.
    #[inline]
    pub fn path_not_found(path: Path) -> Self {
        StateError::PathNotFound { path }
    }

    /// Create a path traversal error.
    #[inline]
    pub fn path_traversal(path: Path, stopped_at: Path) -> Self {
        StateError::PathTraversal { path, stopped_at }
    }

    /// Create an index out of bounds error.
    #[inline]
    pub fn index_out_of_bounds(path: Path, index: usize, len: usize) -> Self {
        StateError::IndexOutOfBounds { path, index, len }
    }

    /// Create a type mismatch error.
    #[inline]
    pub fn type_mismatch(path: Path, expected: &'static str, found: &'static str) -> Self {
        StateError::TypeMismatch {
            path,
            expected,
            found,
        }
    }
}

/// Get the type name of a JSON value.
#[inline]
pub fn value_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
