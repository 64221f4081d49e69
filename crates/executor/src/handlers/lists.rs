//! List commands: LPUSH, RPUSH, LPOP, RPOP, LRANGE, LLEN.
//!
//! Lists are stored as `Value::Array`. A list that becomes empty is removed.

use strata_core::{CommandError, Value};
use strata_storage::Keyspace;

use crate::args::{check_arity, parse_int, parse_key};
use crate::Reply;

fn load_list(ks: &mut Keyspace, key: &str) -> Result<Vec<Value>, CommandError> {
    match ks.get(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(_) => Err(CommandError::WrongType),
    }
}

fn push(ks: &mut Keyspace, command: &str, args: &[Value], front: bool) -> Reply {
    check_arity(command, args, 2, None)?;
    let key = parse_key(&args[0])?;
    let mut items = load_list(ks, &key)?;
    for value in &args[1..] {
        if front {
            items.insert(0, value.clone());
        } else {
            items.push(value.clone());
        }
    }
    let len = items.len();
    ks.replace(&key, Value::Array(items));
    Ok(Value::Int(len as i64))
}

/// LPUSH key element [element ...]
pub fn lpush(ks: &mut Keyspace, args: &[Value]) -> Reply {
    push(ks, "lpush", args, true)
}

/// RPUSH key element [element ...]
pub fn rpush(ks: &mut Keyspace, args: &[Value]) -> Reply {
    push(ks, "rpush", args, false)
}

fn pop(ks: &mut Keyspace, command: &str, args: &[Value], front: bool) -> Reply {
    check_arity(command, args, 1, Some(1))?;
    let key = parse_key(&args[0])?;
    let mut items = load_list(ks, &key)?;
    let popped = if front {
        (!items.is_empty()).then(|| items.remove(0))
    } else {
        items.pop()
    };
    let Some(popped) = popped else {
        return Ok(Value::Null);
    };
    if items.is_empty() {
        ks.remove(&key);
    } else {
        ks.replace(&key, Value::Array(items));
    }
    Ok(popped)
}

/// LPOP key
pub fn lpop(ks: &mut Keyspace, args: &[Value]) -> Reply {
    pop(ks, "lpop", args, true)
}

/// RPOP key
pub fn rpop(ks: &mut Keyspace, args: &[Value]) -> Reply {
    pop(ks, "rpop", args, false)
}

/// LRANGE key start stop
///
/// Negative indices count from the end; out-of-range bounds are clamped.
pub fn lrange(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("lrange", args, 3, Some(3))?;
    let start = parse_int(&args[1])?;
    let stop = parse_int(&args[2])?;
    let items = load_list(ks, &parse_key(&args[0])?)?;

    let len = items.len() as i64;
    let resolve = |index: i64| if index < 0 { len + index } else { index };
    let start = resolve(start).max(0);
    let stop = resolve(stop).min(len - 1);
    if start > stop {
        return Ok(Value::Array(Vec::new()));
    }
    Ok(Value::Array(items[start as usize..=stop as usize].to_vec()))
}

/// LLEN key
pub fn llen(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("llen", args, 1, Some(1))?;
    let items = load_list(ks, &parse_key(&args[0])?)?;
    Ok(Value::Int(items.len() as i64))
}
