//! Convenient imports for Strata.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```ignore
//! use stratakv::prelude::*;
//!
//! let db = Strata::new();
//! db.set("key", "value")?;
//! ```

// Main entry point
pub use crate::config::StrataConfig;
pub use crate::database::{Strata, StrataBuilder};

// Error handling
pub use crate::error::{CommandError, Error, Result};

// Transactions
pub use crate::types::{CommitOutcome, Pipeline, Reply};

// Core types
pub use crate::types::{Clock, ManualClock, Value};
