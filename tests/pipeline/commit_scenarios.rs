//! Commit results for clean watch sets.

use crate::common::*;
use stratakv::prelude::*;

// =============================================================================
// EXECUTED COMMITS
// =============================================================================

#[tokio::test]
async fn test_set_then_incr() {
    let (db, _) = create_db();
    let mut pipeline = db.pipeline();
    pipeline.enqueue("SET", ["a", "1"]).unwrap();
    pipeline.enqueue("INCR", ["a"]).unwrap();

    let replies = commit_replies(&mut pipeline).await;

    assert_eq!(replies, vec![ok(Value::ok()), ok(2)]);
    assert_eq!(db.get("a").unwrap(), Some(Value::from("2")));
}

#[tokio::test]
async fn test_empty_pipeline_commits_to_empty_replies() {
    let (db, _) = create_db();
    let mut pipeline = db.pipeline();

    let outcome = pipeline.commit().await.unwrap();

    assert!(!outcome.is_aborted());
    assert_eq!(outcome.into_replies(), Some(vec![]));
}

#[tokio::test]
async fn test_one_failure_among_many() {
    let (db, _) = create_db_with(&[("name", "strata")]);
    let mut pipeline = db.pipeline();
    pipeline
        .enqueue("set", ["n", "10"])
        .unwrap()
        .enqueue("lpush", ["name", "x"])
        .unwrap()
        .enqueue("incrby", ["n", "5"])
        .unwrap()
        .enqueue("get", ["name"])
        .unwrap();

    let replies = commit_replies(&mut pipeline).await;

    assert_eq!(replies.len(), 4);
    assert_eq!(replies.iter().filter(|r| r.is_err()).count(), 1);
    assert_eq!(replies[1], Err(CommandError::WrongType));
    assert_eq!(replies[2], ok(15));
    assert_eq!(replies[3], ok("strata"));
}

#[tokio::test]
async fn test_arity_error_is_reported_at_commit() {
    let (db, _) = create_db();
    let mut pipeline = db.pipeline();

    // Only the name is checked at enqueue time
    pipeline.enqueue("get", Vec::<Value>::new()).unwrap();
    pipeline.enqueue("ping", Vec::<Value>::new()).unwrap();

    let replies = commit_replies(&mut pipeline).await;

    assert!(matches!(replies[0], Err(CommandError::WrongArity { .. })));
    assert_eq!(replies[1], ok("PONG"));
}

#[tokio::test]
async fn test_pipeline_is_reusable_after_commit() {
    let (db, _) = create_db();
    let mut pipeline = db.pipeline();

    pipeline.enqueue("incr", ["c"]).unwrap();
    assert_eq!(commit_replies(&mut pipeline).await, vec![ok(1)]);

    pipeline.enqueue("incr", ["c"]).unwrap();
    pipeline.enqueue("incr", ["c"]).unwrap();
    assert_eq!(commit_replies(&mut pipeline).await, vec![ok(2), ok(3)]);
    assert_eq!(pipeline.transactions(), 3);
}

#[tokio::test]
async fn test_pipeline_with_preloaded_commands() {
    let (db, _) = create_db();
    let mut pipeline = db
        .pipeline_with(vec![
            ("mset", vec![Value::from("a"), 1.into(), "b".into(), 2.into()]),
            ("mget", vec!["a".into(), "b".into(), "c".into()]),
        ])
        .unwrap();

    let replies = commit_replies(&mut pipeline).await;

    assert_eq!(
        replies[1],
        ok(Value::Array(vec![
            Value::from("1"),
            Value::from("2"),
            Value::Null
        ]))
    );
}

#[tokio::test]
async fn test_seeded_integer_is_incrementable() {
    init_tracing();
    let db = Strata::builder().data([("n", 5i64)]).build().unwrap();
    let mut pipeline = db.pipeline();
    pipeline.enqueue("get", ["n"]).unwrap();
    pipeline.enqueue("incr", ["n"]).unwrap();

    let replies = commit_replies(&mut pipeline).await;

    assert_eq!(replies, vec![ok("5"), ok(6)]);
}

#[tokio::test]
async fn test_non_utf8_keys_fail_their_own_slot() {
    let (db, _) = create_db();
    let mut pipeline = db.pipeline();
    pipeline
        .enqueue("set", vec![Value::Bytes(vec![0xff]), "first".into()])
        .unwrap()
        .enqueue("get", vec![Value::Bytes(vec![0xfe])])
        .unwrap()
        .enqueue("dbsize", Vec::<Value>::new())
        .unwrap();

    let replies = commit_replies(&mut pipeline).await;

    assert_eq!(
        replies,
        vec![
            Err(CommandError::InvalidKey),
            Err(CommandError::InvalidKey),
            ok(0)
        ]
    );
}

// =============================================================================
// ENQUEUE-TIME FAILURES
// =============================================================================

#[test]
fn test_unknown_command_fails_at_enqueue() {
    let (db, _) = create_db();
    let mut pipeline = db.pipeline();

    let err = Error::from(pipeline.enqueue("explode", ["now"]).unwrap_err());

    assert!(err.is_unknown_command());
    assert!(pipeline.is_empty());
}

#[test]
fn test_pipeline_with_unknown_command_fails() {
    let (db, _) = create_db();

    let err = db
        .pipeline_with(vec![("get", vec!["a".into()]), ("nope", vec![])])
        .unwrap_err();

    assert!(err.is_unknown_command());
}

// =============================================================================
// FAULTS
// =============================================================================

#[tokio::test]
async fn test_commit_after_close_is_executor_fault() {
    let (db, _) = create_db();
    let mut pipeline = db.pipeline();
    pipeline.enqueue("set", ["a", "1"]).unwrap();

    db.close();

    let err = Error::from(pipeline.commit().await.unwrap_err());
    assert!(matches!(err, Error::ExecutorFault(_)));
    assert!(err.is_serious());
}
