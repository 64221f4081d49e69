//! Watch-set staleness: dirty writes and passive expiry.

use crate::common::*;
use stratakv::prelude::*;

// =============================================================================
// DIRTY FLAG
// =============================================================================

#[tokio::test]
async fn test_external_dirty_signal_aborts() {
    let (db, _) = create_db();
    db.watch(["a"]).unwrap();
    db.store().set_dirty(true);

    let mut pipeline = db.pipeline();
    pipeline.enqueue("get", ["a"]).unwrap();

    assert_eq!(pipeline.commit().await.unwrap(), CommitOutcome::Aborted);
    assert!(db.store().watching().is_empty());
    assert!(!db.store().is_dirty());
}

#[tokio::test]
async fn test_aborted_batch_is_discarded() {
    let (db, _) = create_db();
    db.watch(["a"]).unwrap();

    let mut pipeline = db.pipeline();
    pipeline.enqueue("set", ["b", "1"]).unwrap();
    db.set("a", "changed").unwrap();

    assert!(pipeline.commit().await.unwrap().is_aborted());
    assert_eq!(db.get("b").unwrap(), None);

    // Nothing from the discarded batch carries over
    assert_eq!(pipeline.commit().await.unwrap().into_replies(), Some(vec![]));
}

#[tokio::test]
async fn test_write_to_unwatched_key_does_not_abort() {
    let (db, _) = create_db();
    db.watch(["a"]).unwrap();
    db.set("b", "x").unwrap();

    let mut pipeline = db.pipeline();
    pipeline.enqueue("get", ["b"]).unwrap();

    assert_eq!(commit_replies(&mut pipeline).await, vec![ok("x")]);
}

#[tokio::test]
async fn test_delete_of_watched_key_aborts() {
    let (db, _) = create_db_with(&[("a", "1")]);
    db.watch(["a"]).unwrap();
    assert_eq!(db.del(["a"]).unwrap(), 1);

    let mut pipeline = db.pipeline();
    pipeline.enqueue("get", ["a"]).unwrap();

    assert!(pipeline.commit().await.unwrap().is_aborted());
}

#[tokio::test]
async fn test_unwatch_clears_dirty_state() {
    let (db, _) = create_db();
    db.watch(["a"]).unwrap();
    db.set("a", "1").unwrap();
    db.unwatch().unwrap();

    let mut pipeline = db.pipeline();
    pipeline.enqueue("get", ["a"]).unwrap();

    assert_eq!(commit_replies(&mut pipeline).await, vec![ok("1")]);
}

#[tokio::test]
async fn test_own_pipelined_writes_do_not_abort_next_commit() {
    let (db, _) = create_db_with(&[("a", "1")]);
    db.watch(["a"]).unwrap();

    let mut pipeline = db.pipeline();
    pipeline.enqueue("incr", ["a"]).unwrap();
    assert_eq!(commit_replies(&mut pipeline).await, vec![ok(2)]);

    // The watch survives a successful commit and is still clean
    assert_eq!(db.store().watching(), vec!["a".to_string()]);
    pipeline.enqueue("incr", ["a"]).unwrap();
    assert_eq!(commit_replies(&mut pipeline).await, vec![ok(3)]);
}

// =============================================================================
// EXPIRY
// =============================================================================

#[tokio::test]
async fn test_expired_watched_key_aborts() {
    let (db, clock) = create_db();
    db.call("set", vec!["a".into(), "1".into(), "PX".into(), 100.into()])
        .unwrap();
    db.watch(["a"]).unwrap();

    let mut pipeline = db.pipeline();
    pipeline.enqueue("get", ["a"]).unwrap();
    clock.advance(100);

    assert!(!db.store().is_dirty());
    assert!(pipeline.commit().await.unwrap().is_aborted());
    assert!(db.store().watching().is_empty());
}

#[tokio::test]
async fn test_unexpired_watched_key_commits() {
    let (db, clock) = create_db();
    db.call("set", vec!["a".into(), "1".into(), "EX".into(), 10.into()])
        .unwrap();
    db.watch(["a"]).unwrap();

    let mut pipeline = db.pipeline();
    pipeline.enqueue("get", ["a"]).unwrap();
    clock.advance(9_999);

    assert_eq!(commit_replies(&mut pipeline).await, vec![ok("1")]);
}

#[tokio::test]
async fn test_expiry_on_unwatched_key_does_not_abort() {
    let (db, clock) = create_db();
    db.call("set", vec!["tmp".into(), "1".into(), "PX".into(), 10.into()])
        .unwrap();
    db.watch(["a"]).unwrap();
    clock.advance(10);

    let mut pipeline = db.pipeline();
    pipeline.enqueue("get", ["tmp"]).unwrap();

    assert_eq!(commit_replies(&mut pipeline).await, vec![ok(Value::Null)]);
}

#[tokio::test]
async fn test_direct_read_evicting_watched_key_aborts() {
    let (db, clock) = create_db();
    db.call("set", vec!["a".into(), "1".into(), "PX".into(), 10.into()])
        .unwrap();
    db.watch(["a"]).unwrap();
    clock.advance(10);

    // Eviction through the direct path counts as a write
    assert_eq!(db.get("a").unwrap(), None);
    assert!(db.store().is_dirty());

    let mut pipeline = db.pipeline();
    pipeline.enqueue("ping", Vec::<Value>::new()).unwrap();
    assert!(pipeline.commit().await.unwrap().is_aborted());
}
