//! The persistence synchronizer: the in-line tail of every staged write.

use crate::diff::{calculate_diff, DiffState};
use crate::error::SessionError;
use crate::model::Document;
use drydock_state::StateCell;
use drydock_store::StageStore;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Runs after every root-bound cursor write, inside the same call:
/// persist the full staged document to the stage slot, recompute the
/// diff against the current committed document, publish the result
/// wholesale.
pub(crate) struct Synchronizer {
    staged: Arc<StateCell>,
    committed: Arc<Mutex<Document>>,
    store: Arc<dyn StageStore>,
    diff_tx: watch::Sender<DiffState>,
}

impl Synchronizer {
    pub(crate) fn new(
        staged: Arc<StateCell>,
        committed: Arc<Mutex<Document>>,
        store: Arc<dyn StageStore>,
        diff_tx: watch::Sender<DiffState>,
    ) -> Self {
        Self {
            staged,
            committed,
            store,
            diff_tx,
        }
    }

    /// Persist, recompute, publish, always in that order.
    pub(crate) fn run(&self) -> Result<(), SessionError> {
        let staged_value = self.staged.snapshot();
        self.store.save(&staged_value)?;

        let staged: Document = serde_json::from_value(staged_value)?;
        let diff = {
            let committed = self.committed.lock().unwrap();
            calculate_diff(&committed, &staged)
        };
        self.diff_tx.send_replace(diff);
        Ok(())
    }

    /// Publish a diff computed elsewhere (commit/rollback paths).
    pub(crate) fn publish(&self, diff: DiffState) {
        self.diff_tx.send_replace(diff);
    }
}
