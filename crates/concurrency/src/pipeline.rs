//! Deferred command queue
//!
//! A [`Pipeline`] accumulates commands without running them. [`Pipeline::commit`]
//! validates the store's watch set and, when it is clean, hands the queued
//! batch to the commit executor.
//!
//! ## Lifecycle
//!
//! ```text
//! Open ──commit()──► Committing ──stale──► Aborted   (batch discarded)
//!                         │
//!                         └────clean────► Executing (runs to completion)
//! ```
//!
//! The pipeline itself is back to Open as soon as `commit` returns: the
//! batch has already been detached, so commands enqueued while the returned
//! future is pending belong to the next commit.

use std::future::Future;
use std::sync::Arc;

use strata_core::{Error, Result, Value};
use strata_executor::args::normalize_args;
use strata_executor::Executor;
use strata_storage::Origin;

use crate::commit::{execute_batch, CommitOutcome};
use crate::operation::{Batch, PendingOperation};
use crate::validation::{abort_watch, validate_watch_set, ValidationResult};

/// Queue of commands committed together under OCC
///
/// # Example
///
/// ```ignore
/// let mut pipeline = Pipeline::new(executor);
/// pipeline.enqueue("set", ["a", "1"])?.enqueue("incr", ["a"])?;
/// let replies = pipeline.commit().await?.into_replies();
/// ```
pub struct Pipeline {
    executor: Executor,
    batch: Batch,
    transactions: u64,
    max_queued: Option<usize>,
}

impl Pipeline {
    /// Create an empty pipeline bound to the executor's store
    pub fn new(executor: Executor) -> Self {
        Self {
            executor,
            batch: Batch::new(),
            transactions: 0,
            max_queued: None,
        }
    }

    /// Create a pipeline pre-loaded with `(name, args)` pairs
    ///
    /// # Errors
    ///
    /// Fails on the first unknown command name.
    pub fn with_commands<I, N>(executor: Executor, commands: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Vec<Value>)>,
        N: AsRef<str>,
    {
        let mut pipeline = Self::new(executor);
        pipeline.enqueue_all(commands)?;
        Ok(pipeline)
    }

    /// Limit the number of commands a single batch may hold
    ///
    /// `None` removes the limit.
    pub fn max_queued_commands(mut self, limit: Option<usize>) -> Self {
        self.max_queued = limit;
        self
    }

    /// Queue one command
    ///
    /// The name is resolved now; arguments are normalized now. Nothing runs
    /// until [`Pipeline::commit`].
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownCommand`] if `name` is not registered
    /// - [`Error::QueueFull`] if the queue limit is reached
    ///
    /// The queue is unchanged on error.
    pub fn enqueue<I, A>(&mut self, name: &str, args: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Value>,
    {
        let command = self.executor.resolve(name)?;

        if let Some(limit) = self.max_queued {
            if self.batch.len() >= limit {
                return Err(Error::QueueFull { limit });
            }
        }

        let args = normalize_args(args.into_iter().map(Into::into).collect());
        tracing::debug!(
            command = name,
            args = args.len(),
            queued = self.batch.len() + 1,
            "Enqueued command"
        );
        self.batch.push(PendingOperation::new(
            name,
            args,
            command,
            Arc::clone(self.executor.store()),
        ));
        self.transactions += 1;
        Ok(self)
    }

    /// Queue `(name, args)` pairs in order
    ///
    /// # Errors
    ///
    /// Stops at the first failing [`Pipeline::enqueue`]; commands queued
    /// before it stay queued.
    pub fn enqueue_all<I, N>(&mut self, commands: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (N, Vec<Value>)>,
        N: AsRef<str>,
    {
        for (name, args) in commands {
            self.enqueue(name.as_ref(), args)?;
        }
        Ok(self)
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    /// True if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Total commands ever enqueued on this pipeline
    ///
    /// Diagnostic only; survives commits and aborts.
    pub fn transactions(&self) -> u64 {
        self.transactions
    }

    /// Queued operations, in commit order
    pub fn queued(&self) -> &[PendingOperation] {
        self.batch.operations()
    }

    /// The executor this pipeline resolves commands with
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Commit the queued batch
    ///
    /// The staleness check, the abort reset and the batch detach all happen
    /// before this method returns. The returned future only dispatches the
    /// detached batch; the pipeline may be reused immediately.
    ///
    /// Resolves to [`CommitOutcome::Aborted`] if a watched key was modified
    /// through the direct path or has expired, and to
    /// [`CommitOutcome::Executed`] with one reply per queued command
    /// otherwise.
    ///
    /// # Errors
    ///
    /// The future resolves to [`Error::ExecutorFault`] if the store was
    /// closed before dispatch.
    pub fn commit(&mut self) -> impl Future<Output = Result<CommitOutcome>> + Send + 'static {
        let store = Arc::clone(self.executor.store());

        let validation = store.with_keyspace(Origin::Pipelined, |ks| {
            let result = validate_watch_set(&*ks);
            if result.is_stale() {
                abort_watch(ks);
            }
            result
        });

        let batch = self.batch.detach();
        let pending = match validation {
            ValidationResult::Clean => {
                tracing::debug!(batch_len = batch.len(), "Dispatching batch");
                Some(batch)
            }
            ValidationResult::Stale(conflict) => {
                tracing::info!(
                    ?conflict,
                    discarded = batch.len(),
                    "Transaction aborted: watched keys are stale"
                );
                None
            }
        };

        async move {
            match pending {
                Some(batch) => execute_batch(batch, store).await,
                None => Ok(CommitOutcome::Aborted),
            }
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("batch", &self.batch)
            .field("transactions", &self.transactions)
            .field("max_queued", &self.max_queued)
            .finish()
    }
}
