//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use stratakv::prelude::*;

/// Clock start used by every helper, in milliseconds
pub const START_MILLIS: u64 = 1_700_000_000_000;

static TRACING: Once = Once::new();

/// Install a fmt subscriber that writes through the test harness
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Fresh instance on a manual clock
pub fn create_db() -> (Strata, Arc<ManualClock>) {
    init_tracing();
    let clock = Arc::new(ManualClock::new(START_MILLIS));
    let db = Strata::builder()
        .name("test")
        .clock(clock.clone())
        .build()
        .expect("default config is valid");
    (db, clock)
}

/// Fresh instance on a manual clock, preloaded with `entries`
pub fn create_db_with(entries: &[(&str, &str)]) -> (Strata, Arc<ManualClock>) {
    init_tracing();
    let clock = Arc::new(ManualClock::new(START_MILLIS));
    let db = Strata::builder()
        .name("test")
        .clock(clock.clone())
        .data(entries.iter().map(|(k, v)| (k.to_string(), Value::from(*v))))
        .build()
        .expect("default config is valid");
    (db, clock)
}

/// Commit and unwrap the replies of an executed batch
pub async fn commit_replies(pipeline: &mut Pipeline) -> Vec<Reply> {
    pipeline
        .commit()
        .await
        .expect("commit should dispatch")
        .into_replies()
        .expect("commit should not abort")
}

/// Shorthand for a successful reply
pub fn ok(value: impl Into<Value>) -> Reply {
    Ok(value.into())
}
