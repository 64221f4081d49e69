//! Pending operations and batches

use std::fmt;
use std::sync::Arc;

use strata_core::Value;
use strata_executor::{Command, Reply};
use strata_storage::{Origin, Store};

/// One queued command, bound to its store
///
/// Built at enqueue time from the resolved command and its normalized
/// arguments. Immutable afterwards.
pub struct PendingOperation {
    name: String,
    args: Vec<Value>,
    command: Arc<dyn Command>,
    store: Arc<Store>,
}

impl PendingOperation {
    /// Bind a resolved command and normalized arguments to `store`
    pub fn new(name: &str, args: Vec<Value>, command: Arc<dyn Command>, store: Arc<Store>) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            args,
            command,
            store,
        }
    }

    /// Lowercase command name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized arguments
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Run the command against its store on the pipelined path
    ///
    /// Pipelined writes never mark watched keys dirty.
    pub fn invoke(&self) -> Reply {
        self.store
            .with_keyspace(Origin::Pipelined, |ks| self.command.execute(ks, &self.args))
    }
}

impl fmt::Debug for PendingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingOperation")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish()
    }
}

/// Ordered sequence of pending operations
///
/// Insertion order is execution order.
#[derive(Debug, Default)]
pub struct Batch {
    operations: Vec<PendingOperation>,
}

impl Batch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation
    pub fn push(&mut self, operation: PendingOperation) {
        self.operations.push(operation);
    }

    /// Number of queued operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// True if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Queued operations in order
    pub fn operations(&self) -> &[PendingOperation] {
        &self.operations
    }

    /// Take every queued operation, leaving this batch empty
    ///
    /// The detached batch is owned by the caller; operations queued here
    /// afterwards are not part of it.
    pub fn detach(&mut self) -> Batch {
        std::mem::take(self)
    }
}

impl IntoIterator for Batch {
    type Item = PendingOperation;
    type IntoIter = std::vec::IntoIter<PendingOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}
