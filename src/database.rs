//! Main entry point for Strata.
//!
//! This module provides the `Strata` struct, which owns a store and its
//! command executor and hands out pipelines bound to them.

use std::sync::Arc;

use strata_concurrency::Pipeline;
use strata_core::{Clock, SystemClock, Value};
use strata_executor::args::normalize_value;
use strata_executor::{Command, CommandRegistry, Executor};
use strata_storage::Store;

use crate::config::StrataConfig;
use crate::error::{Error, Result};

/// An in-memory key-value store with OCC pipelines.
///
/// Create one with [`Strata::new`] or [`Strata::builder`].
///
/// # Example
///
/// ```ignore
/// use stratakv::prelude::*;
///
/// let db = Strata::new();
/// db.set("counter", 1)?;
///
/// db.watch(["counter"])?;
/// let mut pipeline = db.pipeline();
/// pipeline.enqueue("incr", ["counter"])?;
///
/// match pipeline.commit().await? {
///     CommitOutcome::Aborted => println!("someone else touched counter"),
///     CommitOutcome::Executed(replies) => println!("{:?}", replies),
/// }
/// ```
#[derive(Clone)]
pub struct Strata {
    executor: Executor,
    config: Arc<StrataConfig>,
}

impl Strata {
    /// Create an empty instance with default settings and the system clock.
    pub fn new() -> Self {
        Self::from_parts(
            Executor::new(Arc::new(Store::default())),
            StrataConfig::default(),
        )
    }

    /// Create a builder for instance configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = Strata::builder()
    ///     .name("sessions")
    ///     .max_queued_commands(256)
    ///     .data([("greeting", "hello")])
    ///     .build()?;
    /// ```
    pub fn builder() -> StrataBuilder {
        StrataBuilder::new()
    }

    fn from_parts(executor: Executor, config: StrataConfig) -> Self {
        Self {
            executor,
            config: Arc::new(config),
        }
    }

    /// The command executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// The shared store.
    pub fn store(&self) -> &Arc<Store> {
        self.executor.store()
    }

    /// The active configuration.
    pub fn config(&self) -> &StrataConfig {
        &self.config
    }

    // ========================================================================
    // Direct commands
    // ========================================================================

    /// Run one command immediately.
    ///
    /// Writes made here mark watched keys dirty.
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value> {
        self.executor.execute(name, args).map_err(Error::from)
    }

    /// Read a key, `None` if it is missing or expired.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let value = self.call("get", vec![key.into()])?;
        Ok((!value.is_null()).then_some(value))
    }

    /// Store a value, clearing any expiry.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.call("set", vec![key.into(), value.into()])?;
        Ok(())
    }

    /// Increment an integer value, returning the new value.
    pub fn incr(&self, key: &str) -> Result<i64> {
        let value = self.call("incr", vec![key.into()])?;
        value
            .as_int()
            .ok_or_else(|| Error::Command(strata_core::CommandError::NotAnInteger))
    }

    /// Delete keys, returning how many existed.
    pub fn del<I, K>(&self, keys: I) -> Result<i64>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let args = keys.into_iter().map(|k| Value::from(k.as_ref())).collect();
        let value = self.call("del", args)?;
        Ok(value.as_int().unwrap_or(0))
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Start watching keys for the next commit.
    pub fn watch<I, K>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let args = keys.into_iter().map(|k| Value::from(k.as_ref())).collect();
        self.call("watch", args)?;
        Ok(())
    }

    /// Forget all watched keys.
    pub fn unwatch(&self) -> Result<()> {
        self.call("unwatch", Vec::new())?;
        Ok(())
    }

    /// Create an empty pipeline honoring the configured queue limit.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.executor.clone()).max_queued_commands(self.config.max_queued_commands)
    }

    /// Create a pipeline pre-loaded with `(name, args)` pairs.
    ///
    /// The configured queue limit applies to the preloaded commands.
    pub fn pipeline_with<I, N>(&self, commands: I) -> Result<Pipeline>
    where
        I: IntoIterator<Item = (N, Vec<Value>)>,
        N: AsRef<str>,
    {
        let mut pipeline = self.pipeline();
        pipeline.enqueue_all(commands)?;
        Ok(pipeline)
    }

    /// Register a custom command, visible to direct calls and pipelines.
    pub fn define_command(&self, name: &str, command: impl Command + 'static) {
        self.executor.define_command(name, command);
    }

    /// Stop accepting work.
    ///
    /// Direct calls fail with [`Error::Closed`] afterwards; commits that have
    /// not started dispatching fail with [`Error::ExecutorFault`].
    pub fn close(&self) {
        tracing::info!(name = %self.config.name, "Closing Strata instance");
        self.store().close();
    }
}

impl Default for Strata {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Strata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strata")
            .field("config", &self.config)
            .field("closed", &self.store().is_closed())
            .finish()
    }
}

/// Builder for instance configuration.
///
/// # Example
///
/// ```ignore
/// // From a config file, with a fixed clock for tests
/// let db = Strata::builder()
///     .config(StrataConfig::from_file("strata.toml")?)
///     .clock(Arc::new(ManualClock::new(0)))
///     .build()?;
/// ```
pub struct StrataBuilder {
    config: StrataConfig,
    clock: Option<Arc<dyn Clock>>,
    data: Vec<(String, Value)>,
    commands: Vec<(String, Arc<dyn Command>)>,
}

impl StrataBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: StrataConfig::default(),
            clock: None,
            data: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: StrataConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the instance label.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Limit the number of commands one pipeline may queue.
    pub fn max_queued_commands(mut self, limit: usize) -> Self {
        self.config.max_queued_commands = Some(limit);
        self
    }

    /// Use a custom time source for key expiration.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Preload entries. Seeding never marks watched keys dirty.
    ///
    /// Scalars are stored in their string form, as if written by `SET`;
    /// arrays are stored as lists.
    pub fn data<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.data
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Register a custom command.
    pub fn command(mut self, name: &str, command: impl Command + 'static) -> Self {
        self.commands.push((name.to_string(), Arc::new(command)));
        self
    }

    /// Validate the configuration and create the instance.
    pub fn build(self) -> Result<Strata> {
        self.config.validate()?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let store = Arc::new(Store::new(clock));
        store.seed(
            self.data
                .into_iter()
                .map(|(key, value)| (key, normalize_value(value))),
        );

        let registry = Arc::new(CommandRegistry::new());
        for (name, command) in self.commands {
            registry.define_shared(&name, command);
        }

        tracing::info!(
            name = %self.config.name,
            max_queued_commands = ?self.config.max_queued_commands,
            keys = store.len(),
            "Strata instance ready"
        );

        Ok(Strata::from_parts(
            Executor::with_registry(store, registry),
            self.config,
        ))
    }
}

impl Default for StrataBuilder {
    fn default() -> Self {
        Self::new()
    }
}
