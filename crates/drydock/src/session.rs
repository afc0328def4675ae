//! The session: one explicitly constructed application-state object
//! holding the committed/staged/diff triple.
//!
//! A session only exists after bootstrap has reconciled its sources, so
//! no cursor write can ever race the initial load. All staged mutation
//! flows through cursors handed out by [`Session::staged_cursor`], whose
//! write hook runs the persistence synchronizer in-line.

use crate::diff::{calculate_diff, DiffState};
use crate::error::SessionError;
use crate::model::Document;
use crate::sync::Synchronizer;
use drydock_state::{Cursor, HookError, Path, StateCell, WriteHook};
use drydock_store::{BaselineStore, StageStore};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Handle to the committed/staged/diff triple for one editing session.
///
/// Cheap to share: hand out clones of the `Arc`-wrapped session or
/// individual cursors. Mutation is expected from a single logical
/// writer; concurrent cursor writes against a commit or rollback are
/// last-write-wins with no isolation.
pub struct Session {
    committed: Arc<Mutex<Document>>,
    staged: Arc<StateCell>,
    baseline: Arc<dyn BaselineStore>,
    stage_store: Arc<dyn StageStore>,
    synchronizer: Arc<Synchronizer>,
    write_hook: WriteHook,
    diff_rx: watch::Receiver<DiffState>,
}

impl Session {
    /// Assemble a session from reconciled documents. Only the bootstrap
    /// sequencer calls this.
    pub(crate) fn assemble(
        committed: Document,
        staged: Document,
        baseline: Arc<dyn BaselineStore>,
        stage_store: Arc<dyn StageStore>,
    ) -> Result<Self, serde_json::Error> {
        let initial_diff = calculate_diff(&committed, &staged);
        let staged = Arc::new(StateCell::new(serde_json::to_value(&staged)?));
        let committed = Arc::new(Mutex::new(committed));
        let (diff_tx, diff_rx) = watch::channel(initial_diff);

        let synchronizer = Arc::new(Synchronizer::new(
            Arc::clone(&staged),
            Arc::clone(&committed),
            Arc::clone(&stage_store),
            diff_tx,
        ));
        let write_hook: WriteHook = {
            let synchronizer = Arc::clone(&synchronizer);
            Arc::new(move || synchronizer.run().map_err(|e| Box::new(e) as HookError))
        };

        Ok(Self {
            committed,
            staged,
            baseline,
            stage_store,
            synchronizer,
            write_hook,
            diff_rx,
        })
    }

    /// Root-bound cursor over the staged document. Every `swap`/`reset`
    /// through it (or any sub-cursor derived from it) persists the
    /// staged document and republishes the diff before returning.
    pub fn staged_cursor(&self) -> Cursor {
        Cursor::with_hook(
            Arc::clone(&self.staged),
            Path::root(),
            Arc::clone(&self.write_hook),
        )
    }

    /// Cursor narrowed to a sub-path of the staged document. Writes
    /// delegate up to the root trigger.
    pub fn staged_cursor_at(&self, path: Path) -> Cursor {
        self.staged_cursor().at(path)
    }

    /// Raw staged document tree.
    pub fn staged_value(&self) -> Value {
        self.staged.snapshot()
    }

    /// Typed snapshot of the staged document.
    pub fn staged(&self) -> Result<Document, SessionError> {
        Ok(serde_json::from_value(self.staged.snapshot())?)
    }

    /// Snapshot of the committed baseline document.
    pub fn committed(&self) -> Document {
        self.committed.lock().unwrap().clone()
    }

    /// The current diff, as last published.
    pub fn diff(&self) -> DiffState {
        self.diff_rx.borrow().clone()
    }

    /// Subscribe to diff updates. Each published value is a wholesale
    /// replacement of the previous one.
    pub fn subscribe(&self) -> watch::Receiver<DiffState> {
        self.diff_rx.clone()
    }

    /// Publish the staged document as the new committed baseline.
    ///
    /// On success: Committed becomes the pre-commit Staged, the stage
    /// slot is cleared, and a clean diff is published. On failure the
    /// session and the slot are left exactly as they were, so the
    /// commit can be retried without data loss.
    pub async fn commit(&self) -> Result<(), SessionError> {
        let staged = self.staged()?;
        let payload = serde_json::to_value(staged.to_baseline())?;
        self.baseline
            .publish(&payload)
            .await
            .map_err(SessionError::Commit)?;

        *self.committed.lock().unwrap() = staged.clone();
        if let Err(e) = self.stage_store.clear() {
            tracing::warn!(error = %e, "failed to clear stage slot after commit");
        }
        self.synchronizer.publish(calculate_diff(&staged, &staged));
        tracing::debug!(
            features = staged.features.len(),
            "staged document committed to baseline"
        );
        Ok(())
    }

    /// Discard staged changes: Staged becomes a copy of Committed, the
    /// stage slot is cleared, and a clean diff is published. Purely
    /// local.
    pub fn rollback(&self) -> Result<(), SessionError> {
        let committed = self.committed();
        let value = serde_json::to_value(&committed)?;
        self.staged.write(&Path::root(), value)?;
        if let Err(e) = self.stage_store.clear() {
            tracing::warn!(error = %e, "failed to clear stage slot after rollback");
        }
        self.synchronizer
            .publish(calculate_diff(&committed, &committed));
        tracing::debug!("staged document rolled back to baseline");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("diff", &self.diff_rx.borrow().summary)
            .finish()
    }
}
