//! The command abstraction.

use strata_core::{CommandError, Value};
use strata_storage::Keyspace;

/// Outcome of one command invocation
pub type Reply = std::result::Result<Value, CommandError>;

/// An executable command
///
/// Implementations receive the keyspace under the store lock and the
/// normalized argument list (see [`crate::args::normalize_args`]). Any
/// `Fn(&mut Keyspace, &[Value]) -> Reply` is a `Command`, so handlers are
/// plain functions and custom commands can be closures.
pub trait Command: Send + Sync {
    /// Run the command
    fn execute(&self, keyspace: &mut Keyspace, args: &[Value]) -> Reply;
}

impl<F> Command for F
where
    F: Fn(&mut Keyspace, &[Value]) -> Reply + Send + Sync,
{
    fn execute(&self, keyspace: &mut Keyspace, args: &[Value]) -> Reply {
        self(keyspace, args)
    }
}
