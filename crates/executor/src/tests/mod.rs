//! Executor unit tests: dispatch, registry, and built-in command semantics.

use std::sync::Arc;

use strata_core::ManualClock;
use strata_storage::Store;

use crate::Executor;


/// Executor over a fresh store whose clock starts at t=10s.
fn create_executor() -> (Executor, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(10_000));
    let store = Arc::new(Store::new(clock.clone()));
    (Executor::new(store), clock)
}
