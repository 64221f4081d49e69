//! Core types for the Strata key-value store
//!
//! This crate defines the vocabulary shared by every other crate:
//! - [`Value`]: the reply and argument model
//! - [`Error`] and [`CommandError`]: enqueue-time and execution-time failures
//! - [`Clock`]: the time source that drives key expiration
//! - [`WatchState`]: the view of watch bookkeeping the OCC layer validates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod error;
pub mod traits;
pub mod value;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CommandError, Error, Result};
pub use traits::WatchState;
pub use value::Value;
