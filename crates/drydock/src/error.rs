//! Error types for the session and bootstrap layers.

use drydock_state::StateError;
use drydock_store::StoreError;
use thiserror::Error;

/// Errors from session operations (cursor synchronization, commit,
/// rollback).
#[derive(Debug, Error)]
pub enum SessionError {
    /// State access failed.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// The stage side-store rejected an operation.
    #[error("stage store error: {0}")]
    Store(#[from] StoreError),

    /// The staged document no longer matches the document shape.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The baseline store rejected the commit. Local state and the
    /// stage slot are untouched, so the commit can be retried.
    #[error("commit rejected by baseline store: {0}")]
    Commit(#[source] StoreError),
}

/// Errors from the one-time session bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Baseline fetch failed. Fatal: there is no usable baseline
    /// without it and none is synthesized.
    #[error("baseline fetch failed: {0}")]
    Baseline(#[source] StoreError),

    /// The fetched baseline payload had an unusable shape.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
