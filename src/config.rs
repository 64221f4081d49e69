//! Instance configuration.
//!
//! ```toml
//! name = "sessions"
//! max_queued_commands = 1024
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Settings for a [`Strata`](crate::Strata) instance.
///
/// Every field has a default, so an empty document is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrataConfig {
    /// Instance label attached to log output
    pub name: String,

    /// Upper bound on commands queued in one pipeline, unlimited if unset
    pub max_queued_commands: Option<usize>,
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            max_queued_commands: None,
        }
    }
}

impl StrataConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: StrataConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Check invariants that the type system does not.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("name must not be empty".to_string()));
        }
        if self.max_queued_commands == Some(0) {
            return Err(Error::Config(
                "max_queued_commands must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
