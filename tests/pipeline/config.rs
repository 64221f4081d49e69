//! Configuration-driven instances.

use std::io::Write;

use crate::common::*;
use stratakv::prelude::*;

#[test]
fn test_queue_limit_from_toml() {
    init_tracing();
    let config =
        StrataConfig::from_toml_str("name = \"limited\"\nmax_queued_commands = 2").unwrap();
    let db = Strata::builder().config(config).build().unwrap();

    let mut pipeline = db.pipeline();
    pipeline.enqueue("ping", Vec::<Value>::new()).unwrap();
    pipeline.enqueue("ping", Vec::<Value>::new()).unwrap();
    let err = Error::from(pipeline.enqueue("ping", Vec::<Value>::new()).unwrap_err());

    assert!(matches!(err, Error::QueueFull { limit: 2 }));
    assert_eq!(pipeline.len(), 2);
}

#[tokio::test]
async fn test_queue_limit_resets_after_commit() {
    init_tracing();
    let db = Strata::builder().max_queued_commands(1).build().unwrap();

    let mut pipeline = db.pipeline();
    pipeline.enqueue("incr", ["n"]).unwrap();
    assert!(pipeline.enqueue("incr", ["n"]).is_err());

    commit_replies(&mut pipeline).await;
    assert!(pipeline.enqueue("incr", ["n"]).is_ok());
}

#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("stratakv-config-{}.toml", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "name = \"from-file\"").unwrap();
    }

    let config = StrataConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.name, "from-file");
    assert_eq!(config.max_queued_commands, None);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = StrataConfig::from_toml_str("max_queued_commands = \"many\"").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
