//! Commit executor
//!
//! Runs a detached batch against its store and collects one reply per
//! operation.
//!
//! ## Ordering
//!
//! Operations are dispatched strictly one after another in queue order, each
//! under its own store lock acquisition, with a cooperative yield before
//! each dispatch. No operation can observe the effect of a later-queued one,
//! and reply `i` always belongs to the `i`-th enqueued operation.
//!
//! ## Failure Isolation
//!
//! A failing command produces an `Err` in its own reply slot. The remaining
//! operations still run and the commit still succeeds. Only a failure to
//! dispatch the batch at all rejects the commit, as [`Error::ExecutorFault`].

use std::sync::Arc;

use strata_core::{Error, Result};
use strata_executor::Reply;
use strata_storage::Store;

use crate::operation::Batch;

/// Result of committing a pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The watch set was stale; nothing ran
    Aborted,
    /// Every queued operation ran; one reply per operation, in queue order
    Executed(Vec<Reply>),
}

impl CommitOutcome {
    /// True if the transaction was aborted
    pub fn is_aborted(&self) -> bool {
        matches!(self, CommitOutcome::Aborted)
    }

    /// Replies of an executed commit, `None` if aborted
    ///
    /// An executed commit of an empty batch yields `Some(vec![])`, which is
    /// distinct from an abort.
    pub fn into_replies(self) -> Option<Vec<Reply>> {
        match self {
            CommitOutcome::Aborted => None,
            CommitOutcome::Executed(replies) => Some(replies),
        }
    }

    /// Borrow the replies of an executed commit
    pub fn replies(&self) -> Option<&[Reply]> {
        match self {
            CommitOutcome::Aborted => None,
            CommitOutcome::Executed(replies) => Some(replies),
        }
    }
}

/// Dispatch every operation of `batch` in order
///
/// # Errors
///
/// [`Error::ExecutorFault`] if `store` was closed before dispatch began.
/// Command failures never surface here; they are captured in the replies.
pub(crate) async fn execute_batch(batch: Batch, store: Arc<Store>) -> Result<CommitOutcome> {
    if store.is_closed() {
        tracing::warn!(batch_len = batch.len(), "Cannot dispatch batch: store is closed");
        return Err(Error::ExecutorFault {
            reason: "store is closed".to_string(),
        });
    }

    let mut replies = Vec::with_capacity(batch.len());
    for (index, operation) in batch.into_iter().enumerate() {
        tokio::task::yield_now().await;
        let reply = operation.invoke();
        if let Err(e) = &reply {
            tracing::trace!(
                index,
                command = operation.name(),
                error = %e,
                "Command failed inside batch"
            );
        }
        replies.push(reply);
    }

    Ok(CommitOutcome::Executed(replies))
}
