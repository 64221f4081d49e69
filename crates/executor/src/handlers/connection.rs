//! Connection commands: PING, ECHO, WATCH, UNWATCH.

use strata_core::{Value, WatchState};
use strata_storage::Keyspace;

use crate::args::{check_arity, parse_key};
use crate::Reply;

/// PING [message]
pub fn ping(_ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("ping", args, 0, Some(1))?;
    Ok(args
        .first()
        .cloned()
        .unwrap_or_else(|| Value::String("PONG".to_string())))
}

/// ECHO message
pub fn echo(_ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("echo", args, 1, Some(1))?;
    Ok(args[0].clone())
}

/// WATCH key [key ...]
pub fn watch(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("watch", args, 1, None)?;
    let keys = args.iter().map(parse_key).collect::<Result<Vec<_>, _>>()?;
    for key in keys {
        ks.watch(&key);
    }
    Ok(Value::ok())
}

/// UNWATCH
pub fn unwatch(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("unwatch", args, 0, Some(0))?;
    ks.reset_watch();
    Ok(Value::ok())
}
