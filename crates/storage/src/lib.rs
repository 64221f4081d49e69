//! Storage layer for Strata
//!
//! This crate implements the in-memory keyspace the pipelines run against:
//! - ExpirationIndex: key → absolute expiry deadline
//! - Keyspace: FxHashMap-backed data plus expiry, watch set and dirty flag
//! - Store: Mutex-guarded keyspace shared between direct and pipelined callers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod keyspace;
pub mod store;
pub mod ttl;

pub use keyspace::{Keyspace, Ttl};
pub use store::{Origin, Store};
pub use ttl::ExpirationIndex;
