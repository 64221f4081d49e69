//! Concurrency layer for Strata
//!
//! This crate implements optimistic concurrency control (OCC) for deferred
//! command batches:
//! - Pipeline: queue commands without executing them
//! - Validation: detect a dirty or expired watch set at commit time
//! - Commit: run the detached batch in order, one reply per command
//!
//! ## Commit Sequence
//!
//! ```text
//! 1. validate_watch_set() under the store lock
//! 2. IF stale: abort_watch(), discard the batch, resolve to Aborted
//! 3. Detach the batch; the pipeline starts a fresh one
//! 4. Dispatch each operation in queue order, yielding between them
//! 5. Resolve to Executed(replies)
//! ```
//!
//! Steps 1–3 run synchronously inside `Pipeline::commit`, before the
//! returned future is first polled.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commit;
pub mod operation;
pub mod pipeline;
pub mod validation;

pub use commit::CommitOutcome;
pub use operation::{Batch, PendingOperation};
pub use pipeline::Pipeline;
pub use validation::{abort_watch, validate_watch_set, ConflictType, ValidationResult};

pub use strata_executor::Reply;
