//! One-time session bootstrap.
//!
//! Reconciles three possible state sources (the remote baseline, a
//! previously persisted staged copy, and the baseline itself as the
//! default) into one consistent committed/staged pair. Because
//! [`Session`] can only be built here, no cursor write can be dispatched
//! before reconciliation is complete.

use crate::error::BootstrapError;
use crate::model::{BaselinePayload, Document};
use crate::session::Session;
use drydock_store::{BaselineStore, StageStore, StoreError};
use std::sync::Arc;

/// Session bootstrap sequencer. Runs once.
pub struct Bootstrap {
    baseline: Arc<dyn BaselineStore>,
    stage_store: Arc<dyn StageStore>,
}

impl Bootstrap {
    /// Create a bootstrap over the given stores.
    pub fn new(baseline: Arc<dyn BaselineStore>, stage_store: Arc<dyn StageStore>) -> Self {
        Self {
            baseline,
            stage_store,
        }
    }

    /// Fetch the baseline, reconcile it with any locally persisted
    /// staged copy, and hand back a live session with its initial diff
    /// published.
    ///
    /// A failed baseline fetch is fatal: no default is synthesized.
    /// There is no timeout here; a hung fetch suspends the bootstrap
    /// until the caller gives up.
    pub async fn run(self) -> Result<Session, BootstrapError> {
        let payload = self
            .baseline
            .fetch()
            .await
            .map_err(BootstrapError::Baseline)?;
        let payload: BaselinePayload = serde_json::from_value(payload)?;
        let committed = Document::from_baseline(payload);
        tracing::debug!(features = committed.features.len(), "baseline loaded");

        let staged = self.reconcile_staged(&committed);
        Ok(Session::assemble(
            committed,
            staged,
            self.baseline,
            self.stage_store,
        )?)
    }

    /// Derive the initial staged document from the stage slot.
    ///
    /// Merge policy for a persisted entry: locally staged scalars
    /// (`count`) survive the reload, the feature set is always taken
    /// fresh from the baseline. Malformed entries are discarded;
    /// unreadable stores are treated as empty.
    fn reconcile_staged(&self, committed: &Document) -> Document {
        match self.stage_store.load() {
            Ok(Some(value)) => match serde_json::from_value::<Document>(value) {
                Ok(local) => {
                    tracing::debug!(count = local.count, "restored staged scalars from stage slot");
                    Document {
                        count: local.count,
                        features: committed.features.clone(),
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "discarding malformed staged document");
                    if let Err(e) = self.stage_store.clear() {
                        tracing::warn!(error = %e, "failed to discard malformed stage slot entry");
                    }
                    committed.clone()
                }
            },
            Ok(None) => {
                tracing::debug!("no staged document persisted; staging a baseline copy");
                committed.clone()
            }
            Err(StoreError::Serialization(e)) => {
                tracing::warn!(error = %e, "discarding malformed staged document");
                if let Err(e) = self.stage_store.clear() {
                    tracing::warn!(error = %e, "failed to discard malformed stage slot entry");
                }
                committed.clone()
            }
            Err(e) => {
                tracing::warn!(error = %e, "stage store read failed; staging a baseline copy");
                committed.clone()
            }
        }
    }
}
