//! Staged/committed document editing with a continuously derived diff.
//!
//! `drydock` keeps two parallel copies of a document, a *committed*
//! baseline and a *staged* working copy, and recomputes a structural
//! diff between them after every staged mutation, so a consumer can show
//! pending changes, roll back to the baseline, or commit the staged copy
//! to durable storage.
//!
//! # Core flow
//!
//! 1. [`Bootstrap`] fetches the baseline, reconciles it with any locally
//!    persisted staged copy, and produces a [`Session`].
//! 2. All staged mutation goes through [`Cursor`]s handed out by the
//!    session; every write persists the staged document to the stage
//!    slot and republishes the [`DiffState`] before returning.
//! 3. [`Session::commit`] publishes staged → baseline;
//!    [`Session::rollback`] copies committed → staged. Both clear the
//!    stage slot and publish a clean diff.
//!
//! # Example
//!
//! ```
//! use drydock::{path, Bootstrap, Feature, MemoryBaseline, MemoryStageStore};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let baseline = Arc::new(MemoryBaseline::new(json!({
//!     "features": [{"id": "1", "name": "A", "description": ""}]
//! })));
//! let slot = Arc::new(MemoryStageStore::new());
//!
//! let session = Bootstrap::new(baseline, slot).run().await?;
//! assert!(!session.diff().has_changes);
//!
//! let features = session.staged_cursor_at(path!("features"));
//! features.swap(|mut v| {
//!     v.as_array_mut()
//!         .unwrap()
//!         .push(json!({"id": "2", "name": "B", "description": ""}));
//!     v
//! })?;
//!
//! let diff = session.diff();
//! assert_eq!(diff.changed_paths, vec!["features[2]"]);
//! assert_eq!(diff.summary_text(), "1 added");
//!
//! session.commit().await?;
//! assert!(!session.diff().has_changes);
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod diff;
mod error;
mod model;
mod session;
mod sync;

pub use bootstrap::Bootstrap;
pub use diff::{calculate_diff, DiffState, DiffSummary};
pub use error::{BootstrapError, SessionError};
pub use model::{Attack, BaselinePayload, Document, Feature};
pub use session::Session;

// State plumbing
pub use drydock_state::{
    get_at_path, path, set_at_path, Cursor, Path, Seg, StateCell, StateError, StateResult,
};

// Store contracts and adapters
pub use drydock_store::{
    BaselineStore, FileBaseline, FileStageStore, MemoryBaseline, MemoryStageStore, StageStore,
    StoreError,
};
