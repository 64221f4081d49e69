//! # StrataKV
//!
//! Embedded key-value store with MULTI/EXEC-style pipelines under
//! optimistic concurrency control.
//!
//! ## Quick Start
//!
//! ```ignore
//! use stratakv::prelude::*;
//!
//! let db = Strata::new();
//! db.set("balance", 100)?;
//!
//! // Observe, then commit only if nobody else wrote the key
//! db.watch(["balance"])?;
//! let mut pipeline = db.pipeline();
//! pipeline
//!     .enqueue("decrby", ["balance", "30"])?
//!     .enqueue("get", ["balance"])?;
//!
//! match pipeline.commit().await? {
//!     CommitOutcome::Aborted => { /* retry */ }
//!     CommitOutcome::Executed(replies) => assert_eq!(replies.len(), 2),
//! }
//! ```
//!
//! ## Commit Semantics
//!
//! - A write to a watched key through a direct call ([`Strata::call`] and
//!   friends), or the expiry of a watched key, makes the next commit abort.
//! - An aborted commit runs nothing and clears the watch set.
//! - An executed commit returns one reply per queued command, in order. A
//!   failing command only fails its own slot.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod database;
mod error;
mod types;

pub mod prelude;

// Re-export main entry points
pub use config::StrataConfig;
pub use database::{Strata, StrataBuilder};
pub use error::{Error, Result};

// Re-export types
pub use types::*;
