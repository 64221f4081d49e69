//! Custom commands registered alongside the built-ins.

use crate::common::*;
use stratakv::prelude::*;
use stratakv::Keyspace;

/// GETSET-style command: store a new value, reply the old one
fn swap(ks: &mut Keyspace, args: &[Value]) -> Reply {
    if args.len() != 2 {
        return Err(CommandError::wrong_arity("swap"));
    }
    let key = args[0].as_str().unwrap_or_default().to_string();
    let old = ks.get(&key).cloned().unwrap_or(Value::Null);
    ks.set(&key, args[1].clone());
    Ok(old)
}

#[tokio::test]
async fn test_custom_command_in_pipeline() {
    let (db, _) = create_db_with(&[("k", "old")]);
    db.define_command("swap", swap);

    let mut pipeline = db.pipeline();
    pipeline.enqueue("SWAP", ["k", "new"]).unwrap();
    pipeline.enqueue("swap", ["k"]).unwrap();
    pipeline.enqueue("get", ["k"]).unwrap();

    let replies = commit_replies(&mut pipeline).await;

    assert_eq!(replies[0], ok("old"));
    assert!(matches!(replies[1], Err(CommandError::WrongArity { .. })));
    assert_eq!(replies[2], ok("new"));
}

#[tokio::test]
async fn test_builder_registered_command() {
    init_tracing();
    let db = Strata::builder()
        .command("swap", swap)
        .data([("k", "v")])
        .build()
        .unwrap();

    assert_eq!(db.call("swap", vec!["k".into(), "w".into()]).unwrap(), Value::from("v"));
    assert_eq!(db.get("k").unwrap(), Some(Value::from("w")));
}

#[tokio::test]
async fn test_custom_command_shadows_builtin() {
    let (db, _) = create_db();
    db.define_command("ping", |_: &mut Keyspace, _: &[Value]| -> Reply {
        Ok(Value::from("custom pong"))
    });

    let mut pipeline = db.pipeline();
    pipeline.enqueue("PING", Vec::<Value>::new()).unwrap();

    assert_eq!(commit_replies(&mut pipeline).await, vec![ok("custom pong")]);
}

#[test]
fn test_custom_command_defined_after_enqueue_attempt() {
    let (db, _) = create_db();
    let mut pipeline = db.pipeline();
    assert!(pipeline.enqueue("swap", ["k", "v"]).is_err());

    db.define_command("swap", swap);
    assert!(pipeline.enqueue("swap", ["k", "v"]).is_ok());
}

#[tokio::test]
async fn test_custom_direct_write_dirties_watch() {
    let (db, _) = create_db();
    db.define_command("swap", swap);
    db.watch(["k"]).unwrap();
    db.call("swap", vec!["k".into(), "v".into()]).unwrap();

    let mut pipeline = db.pipeline();
    pipeline.enqueue("get", ["k"]).unwrap();

    assert!(pipeline.commit().await.unwrap().is_aborted());
}
