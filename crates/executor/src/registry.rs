//! Command registry.
//!
//! Names are case-insensitive. Custom commands shadow built-ins with the same
//! name; built-ins are shared process-wide and never change.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::handlers;
use crate::Command;

static BUILTINS: Lazy<FxHashMap<&'static str, Arc<dyn Command>>> =
    Lazy::new(|| handlers::builtins().into_iter().collect());

/// Name → command lookup table
#[derive(Default)]
pub struct CommandRegistry {
    custom: RwLock<FxHashMap<String, Arc<dyn Command>>>,
}

impl CommandRegistry {
    /// Create a registry holding only the built-in commands
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom command, replacing any earlier custom definition
    ///
    /// A custom command named like a built-in takes precedence over it.
    pub fn define(&self, name: &str, command: impl Command + 'static) {
        self.define_shared(name, Arc::new(command));
    }

    /// Register an already shared custom command
    pub fn define_shared(&self, name: &str, command: Arc<dyn Command>) {
        let name = name.to_ascii_lowercase();
        if BUILTINS.contains_key(name.as_str()) {
            tracing::debug!(command = %name, "Custom command shadows built-in");
        }
        self.custom.write().insert(name, command);
    }

    /// Resolve `name`, custom definitions first
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Command>> {
        let name = name.to_ascii_lowercase();
        if let Some(command) = self.custom.read().get(&name) {
            return Some(Arc::clone(command));
        }
        BUILTINS.get(name.as_str()).cloned()
    }

    /// True if `name` resolves to any command
    pub fn contains(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.custom.read().contains_key(&name) || BUILTINS.contains_key(name.as_str())
    }

    /// True if `name` is a built-in command
    pub fn is_builtin(name: &str) -> bool {
        BUILTINS.contains_key(name.to_ascii_lowercase().as_str())
    }

    /// Every resolvable name, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTINS.keys().map(|name| name.to_string()).collect();
        for name in self.custom.read().keys() {
            if !BUILTINS.contains_key(name.as_str()) {
                names.push(name.clone());
            }
        }
        names.sort();
        names
    }
}
