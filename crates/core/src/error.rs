//! Error types for Strata
//!
//! Two layers:
//! - [`CommandError`]: a single command failed while executing. Inside a
//!   committed batch it is captured in that command's reply slot and never
//!   aborts its siblings.
//! - [`Error`]: failures of the surrounding machinery (registry lookup,
//!   queue limits, batch dispatch, configuration).

use thiserror::Error;

/// A command failed during execution
///
/// Messages follow the Redis reply texts so callers can surface them as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Argument count does not match the command's arity
    #[error("ERR wrong number of arguments for '{command}' command")]
    WrongArity {
        /// Lowercase command name
        command: String,
    },

    /// Operation against a key holding the wrong kind of value
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,

    /// Value or argument is not a 64-bit integer
    #[error("ERR value is not an integer or out of range")]
    NotAnInteger,

    /// Arithmetic would overflow i64
    #[error("ERR increment or decrement would overflow")]
    Overflow,

    /// Unrecognized option or malformed option list
    #[error("ERR syntax error")]
    Syntax,

    /// Expiration time is out of range
    #[error("ERR invalid expire time in '{command}' command")]
    InvalidExpireTime {
        /// Lowercase command name
        command: String,
    },

    /// Key is binary data that is not valid UTF-8
    #[error("ERR invalid key: keys must be valid UTF-8")]
    InvalidKey,

    /// Command-specific failure raised by a custom command
    #[error("ERR {0}")]
    Custom(String),
}

impl CommandError {
    /// Build a [`CommandError::WrongArity`] for `command`
    pub fn wrong_arity(command: &str) -> Self {
        CommandError::WrongArity {
            command: command.to_ascii_lowercase(),
        }
    }
}

/// Errors raised by the registry, queue and commit machinery
#[derive(Debug, Error)]
pub enum Error {
    /// Command name is not registered (raised at enqueue time)
    #[error("ERR unknown command '{name}'")]
    UnknownCommand {
        /// Name as supplied by the caller
        name: String,
    },

    /// Pipeline already holds the configured maximum number of commands
    #[error("pipeline is full: {limit} commands already queued")]
    QueueFull {
        /// Configured limit
        limit: usize,
    },

    /// Command failed on the direct (non-pipelined) path
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Store was closed; no further commands are accepted
    #[error("store is closed")]
    StoreClosed,

    /// Batch could not be dispatched; the whole commit is rejected
    #[error("executor fault: {reason}")]
    ExecutorFault {
        /// Why the batch could not be dispatched
        reason: String,
    },

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for Strata core operations
pub type Result<T> = std::result::Result<T, Error>;
