//! Generic key commands: DEL, EXISTS, EXPIRE, PEXPIRE, TTL, PTTL, PERSIST,
//! TYPE, DBSIZE.

use strata_core::{CommandError, Value};
use strata_storage::{Keyspace, Ttl};

use crate::args::{check_arity, parse_int, parse_key};
use crate::Reply;

/// DEL key [key ...]
pub fn del(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("del", args, 1, None)?;
    let keys = args.iter().map(parse_key).collect::<Result<Vec<_>, _>>()?;
    let removed = keys.iter().filter(|key| ks.remove(key).is_some()).count();
    Ok(Value::Int(removed as i64))
}

/// EXISTS key [key ...]
///
/// A key named more than once is counted each time.
pub fn exists(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("exists", args, 1, None)?;
    let keys = args.iter().map(parse_key).collect::<Result<Vec<_>, _>>()?;
    let found = keys.iter().filter(|key| ks.contains_key(key)).count();
    Ok(Value::Int(found as i64))
}

fn expire_in(ks: &mut Keyspace, command: &str, key: &str, millis: i64) -> Reply {
    if !ks.contains_key(key) {
        return Ok(Value::Int(0));
    }
    // A deadline already in the past deletes the key outright
    if millis <= 0 {
        ks.remove(key);
        return Ok(Value::Int(1));
    }
    let deadline = ks
        .now_millis()
        .checked_add(millis.unsigned_abs())
        .ok_or_else(|| CommandError::InvalidExpireTime {
            command: command.to_string(),
        })?;
    ks.expire_at(key, deadline);
    Ok(Value::Int(1))
}

/// EXPIRE key seconds
pub fn expire(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("expire", args, 2, Some(2))?;
    let millis = parse_int(&args[1])?
        .checked_mul(1_000)
        .ok_or_else(|| CommandError::InvalidExpireTime {
            command: "expire".to_string(),
        })?;
    expire_in(ks, "expire", &parse_key(&args[0])?, millis)
}

/// PEXPIRE key milliseconds
pub fn pexpire(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("pexpire", args, 2, Some(2))?;
    let millis = parse_int(&args[1])?;
    expire_in(ks, "pexpire", &parse_key(&args[0])?, millis)
}

fn ttl_reply(ttl: Ttl, divisor: u64) -> Value {
    match ttl {
        Ttl::Missing => Value::Int(-2),
        Ttl::Persistent => Value::Int(-1),
        // Round to the nearest unit
        Ttl::Millis(ms) => {
            let units = ms.saturating_add(divisor / 2) / divisor;
            Value::Int(i64::try_from(units).unwrap_or(i64::MAX))
        }
    }
}

/// TTL key
///
/// Replies -2 for a missing key, -1 for a key without a deadline.
pub fn ttl(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("ttl", args, 1, Some(1))?;
    Ok(ttl_reply(ks.remaining_ttl(&parse_key(&args[0])?), 1_000))
}

/// PTTL key
pub fn pttl(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("pttl", args, 1, Some(1))?;
    Ok(ttl_reply(ks.remaining_ttl(&parse_key(&args[0])?), 1))
}

/// PERSIST key
pub fn persist(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("persist", args, 1, Some(1))?;
    Ok(Value::Int(i64::from(ks.persist(&parse_key(&args[0])?))))
}

/// TYPE key
pub fn key_type(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("type", args, 1, Some(1))?;
    let name = match ks.get(&parse_key(&args[0])?) {
        None => "none",
        Some(Value::Array(_)) => "list",
        Some(_) => "string",
    };
    Ok(Value::String(name.to_string()))
}

/// DBSIZE
///
/// Expired keys are purged first so they are never counted.
pub fn dbsize(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("dbsize", args, 0, Some(0))?;
    ks.purge_expired();
    Ok(Value::Int(ks.len() as i64))
}
