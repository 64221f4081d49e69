//! Reply ordering and batch isolation across concurrent commits.

use std::sync::Arc;

use crate::common::*;
use proptest::prelude::*;
use stratakv::prelude::*;

#[tokio::test]
async fn test_later_operation_sees_earlier_writes() {
    let (db, _) = create_db();
    let mut pipeline = db.pipeline();
    pipeline
        .enqueue("rpush", ["l", "a"])
        .unwrap()
        .enqueue("rpush", ["l", "b"])
        .unwrap()
        .enqueue("lpop", ["l"])
        .unwrap()
        .enqueue("llen", ["l"])
        .unwrap();

    let replies = commit_replies(&mut pipeline).await;

    assert_eq!(replies, vec![ok(1), ok(2), ok("a"), ok(1)]);
}

#[tokio::test]
async fn test_enqueue_during_pending_commit_starts_new_batch() {
    let (db, _) = create_db();
    let mut pipeline = db.pipeline();
    pipeline.enqueue("set", ["k", "first"]).unwrap();

    let pending = pipeline.commit();
    pipeline.enqueue("get", ["k"]).unwrap();
    assert_eq!(pipeline.len(), 1);

    assert_eq!(pending.await.unwrap().into_replies().unwrap(), vec![ok(Value::ok())]);
    assert_eq!(commit_replies(&mut pipeline).await, vec![ok("first")]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_commits_keep_per_batch_order() {
    let (db, _) = create_db();
    let mut handles = Vec::new();

    for worker in 0..8 {
        let mut pipeline = db.pipeline();
        let list = format!("list:{}", worker);
        for i in 0..25 {
            pipeline.enqueue("rpush", [list.clone(), i.to_string()]).unwrap();
        }
        pipeline.enqueue("lrange", [list.as_str(), "0", "-1"]).unwrap();
        handles.push(tokio::spawn(pipeline.commit()));
    }

    for handle in handles {
        let replies = handle.await.unwrap().unwrap().into_replies().unwrap();
        assert_eq!(replies.len(), 26);
        for (i, reply) in replies[..25].iter().enumerate() {
            assert_eq!(reply, &ok(i as i64 + 1));
        }
        let expected: Vec<Value> = (0..25).map(|i| Value::from(i.to_string())).collect();
        assert_eq!(replies[25], ok(Value::Array(expected)));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_are_not_lost() {
    let (db, _) = create_db();
    let db = Arc::new(db);
    let mut handles = Vec::new();

    for _ in 0..10 {
        let mut pipeline = db.pipeline();
        for _ in 0..10 {
            pipeline.enqueue("incr", ["shared"]).unwrap();
        }
        handles.push(tokio::spawn(pipeline.commit()));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(db.get("shared").unwrap(), Some(Value::from("100")));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Mixed successes and failures keep one reply per enqueue, in order
    #[test]
    fn prop_reply_slots_follow_enqueue_order(plan in prop::collection::vec(any::<bool>(), 0..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let (db, _) = create_db_with(&[("text", "abc")]);
        let mut pipeline = db.pipeline();
        for &succeed in &plan {
            let key = if succeed { "num" } else { "text" };
            pipeline.enqueue("incr", [key]).unwrap();
        }

        let replies = runtime.block_on(commit_replies(&mut pipeline));

        prop_assert_eq!(replies.len(), plan.len());
        let mut expected_num = 0;
        for (reply, &succeed) in replies.iter().zip(&plan) {
            if succeed {
                expected_num += 1;
                prop_assert_eq!(reply, &ok(expected_num));
            } else {
                prop_assert_eq!(reply, &Err(CommandError::NotAnInteger));
            }
        }
    }
}
