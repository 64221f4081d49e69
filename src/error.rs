//! Unified error types for Strata.
//!
//! This module provides a clean error type that wraps internal errors
//! and presents a consistent interface to users.

use thiserror::Error;

pub use strata_core::CommandError;

/// All Strata errors.
///
/// This is the canonical error type for all Strata operations.
/// Aborted transactions are not errors; they are reported as
/// [`CommitOutcome::Aborted`](crate::CommitOutcome::Aborted).
#[derive(Debug, Error)]
pub enum Error {
    /// Command name is not registered
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command ran and failed
    #[error("{0}")]
    Command(#[from] CommandError),

    /// Pipeline queue limit reached
    #[error("pipeline is full: {limit} commands already queued")]
    QueueFull {
        /// Configured limit
        limit: usize,
    },

    /// The store no longer accepts work
    #[error("store is closed")]
    Closed,

    /// A committed batch could not be dispatched
    #[error("executor fault: {0}")]
    ExecutorFault(String),

    /// Configuration is malformed or violates an invariant
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Strata operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is an unknown-command error.
    pub fn is_unknown_command(&self) -> bool {
        matches!(self, Error::UnknownCommand(_))
    }

    /// Check if this error is retryable.
    ///
    /// A full queue drains on the next commit.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::QueueFull { .. })
    }

    /// Check if this is a serious/unrecoverable error.
    ///
    /// Serious errors indicate the store cannot make progress.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Closed | Error::ExecutorFault(_) | Error::Io(_))
    }
}

// Convert from internal core errors
impl From<strata_core::Error> for Error {
    fn from(e: strata_core::Error) -> Self {
        use strata_core::Error as CoreError;
        match e {
            CoreError::UnknownCommand { name } => Error::UnknownCommand(name),
            CoreError::QueueFull { limit } => Error::QueueFull { limit },
            CoreError::Command(err) => Error::Command(err),
            CoreError::StoreClosed => Error::Closed,
            CoreError::ExecutorFault { reason } => Error::ExecutorFault(reason),
            CoreError::InvalidConfig(msg) => Error::Config(msg),
        }
    }
}

// Convert from TOML parse errors
impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
