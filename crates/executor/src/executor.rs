//! Direct-path command execution.

use std::sync::Arc;

use strata_core::{Error, Result, Value};
use strata_storage::{Origin, Store};

use crate::args::normalize_args;
use crate::{Command, CommandRegistry};

/// Resolves command names and runs them against a store
///
/// Commands run through [`Executor::execute`] take the direct path: a write
/// to a watched key marks the store dirty. Pipelines reuse the executor for
/// name resolution and dispatch their batches on the pipelined path.
///
/// Cloning is cheap; clones share the store and the registry.
#[derive(Clone)]
pub struct Executor {
    store: Arc<Store>,
    registry: Arc<CommandRegistry>,
}

impl Executor {
    /// Create an executor over `store` with only the built-in commands
    pub fn new(store: Arc<Store>) -> Self {
        Self::with_registry(store, Arc::new(CommandRegistry::new()))
    }

    /// Create an executor over `store` sharing an existing registry
    pub fn with_registry(store: Arc<Store>, registry: Arc<CommandRegistry>) -> Self {
        Self { store, registry }
    }

    /// The store commands run against
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// The command registry
    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Register a custom command
    pub fn define_command(&self, name: &str, command: impl Command + 'static) {
        self.registry.define(name, command);
    }

    /// Look up `name` in the registry
    ///
    /// # Errors
    ///
    /// [`Error::UnknownCommand`] if no built-in or custom command matches.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Command>> {
        self.registry.lookup(name).ok_or_else(|| Error::UnknownCommand {
            name: name.to_string(),
        })
    }

    /// Execute one command immediately
    ///
    /// # Errors
    ///
    /// - [`Error::StoreClosed`] once the store has been closed
    /// - [`Error::UnknownCommand`] for an unregistered name
    /// - [`Error::Command`] if the command itself fails
    pub fn execute(&self, name: &str, args: Vec<Value>) -> Result<Value> {
        if self.store.is_closed() {
            return Err(Error::StoreClosed);
        }
        let command = self.resolve(name)?;
        let args = normalize_args(args);
        let reply = self
            .store
            .with_keyspace(Origin::Direct, |ks| command.execute(ks, &args));
        if let Err(e) = &reply {
            tracing::trace!(command = name, error = %e, "Command failed");
        }
        reply.map_err(Error::from)
    }
}
