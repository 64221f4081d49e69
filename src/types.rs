//! Public types for the Strata API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Value model and command failures
pub use strata_core::{CommandError, Value};

// Time sources
pub use strata_core::{Clock, ManualClock, SystemClock};

// Pipelines
pub use strata_concurrency::{CommitOutcome, ConflictType, Pipeline, Reply};

// Extension points
pub use strata_executor::{Command, CommandRegistry, Executor};
pub use strata_storage::{Keyspace, Store, Ttl};
