//! Command execution layer for Strata
//!
//! This crate maps command names to implementations and runs them against a
//! [`Store`](strata_storage::Store):
//! - [`Command`]: one executable command (plain functions and closures qualify)
//! - [`CommandRegistry`]: built-in table plus caller-defined custom commands
//! - [`Executor`]: resolves names and runs commands on the direct path
//! - [`args`]: argument normalization and parsing helpers for handlers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
mod command;
mod executor;
mod handlers;
mod registry;

#[cfg(test)]
mod tests;

pub use command::{Command, Reply};
pub use executor::Executor;
pub use registry::CommandRegistry;

pub use strata_core::{CommandError, Error, Result, Value};
