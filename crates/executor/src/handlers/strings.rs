//! String commands: GET, SET, MGET, MSET, INCR family, APPEND, STRLEN.

use strata_core::{CommandError, Value};
use strata_storage::Keyspace;

use crate::args::{check_arity, parse_int, parse_int_bytes, parse_key, text};
use crate::Reply;

/// GET key
pub fn get(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("get", args, 1, Some(1))?;
    match ks.get(&parse_key(&args[0])?) {
        None => Ok(Value::Null),
        Some(value) if value.is_string_like() => Ok(value.clone()),
        Some(_) => Err(CommandError::WrongType),
    }
}

/// Existence condition for SET
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetCondition {
    Always,
    IfAbsent,
    IfPresent,
}

/// SET key value [EX seconds | PX milliseconds] [NX | XX]
///
/// Replies `OK`, or nil when the NX/XX condition is not met.
pub fn set(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("set", args, 2, None)?;
    let key = parse_key(&args[0])?;

    let mut ttl_millis: Option<i64> = None;
    let mut condition = SetCondition::Always;
    let mut options = args[2..].iter();
    while let Some(option) = options.next() {
        match text(option).to_ascii_uppercase().as_str() {
            unit @ ("EX" | "PX") => {
                if ttl_millis.is_some() {
                    return Err(CommandError::Syntax);
                }
                let amount = parse_int(options.next().ok_or(CommandError::Syntax)?)?;
                let invalid = || CommandError::InvalidExpireTime {
                    command: "set".to_string(),
                };
                if amount <= 0 {
                    return Err(invalid());
                }
                let millis = if unit == "EX" {
                    amount.checked_mul(1_000).ok_or_else(invalid)?
                } else {
                    amount
                };
                ttl_millis = Some(millis);
            }
            "NX" if condition == SetCondition::Always => condition = SetCondition::IfAbsent,
            "XX" if condition == SetCondition::Always => condition = SetCondition::IfPresent,
            _ => return Err(CommandError::Syntax),
        }
    }

    let deadline = match ttl_millis {
        Some(millis) => Some(
            ks.now_millis()
                .checked_add(millis.unsigned_abs())
                .ok_or_else(|| CommandError::InvalidExpireTime {
                    command: "set".to_string(),
                })?,
        ),
        None => None,
    };

    let exists = ks.contains_key(&key);
    match condition {
        SetCondition::IfAbsent if exists => return Ok(Value::Null),
        SetCondition::IfPresent if !exists => return Ok(Value::Null),
        _ => {}
    }

    ks.set(&key, args[1].clone());
    if let Some(deadline) = deadline {
        ks.expire_at(&key, deadline);
    }
    Ok(Value::ok())
}

/// MGET key [key ...]
///
/// Missing keys and keys holding non-string values reply nil.
pub fn mget(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("mget", args, 1, None)?;
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        let value = match ks.get(&parse_key(arg)?) {
            Some(value) if value.is_string_like() => value.clone(),
            _ => Value::Null,
        };
        values.push(value);
    }
    Ok(Value::Array(values))
}

/// MSET key value [key value ...]
pub fn mset(ks: &mut Keyspace, args: &[Value]) -> Reply {
    if args.is_empty() || args.len() % 2 != 0 {
        return Err(CommandError::wrong_arity("mset"));
    }
    let mut pairs = Vec::with_capacity(args.len() / 2);
    for pair in args.chunks_exact(2) {
        pairs.push((parse_key(&pair[0])?, &pair[1]));
    }
    for (key, value) in pairs {
        ks.set(&key, value.clone());
    }
    Ok(Value::ok())
}

fn incr_by(ks: &mut Keyspace, key: &str, delta: i64) -> Reply {
    let current = match ks.get(key) {
        None => 0,
        Some(value) => parse_int_bytes(value.as_payload().ok_or(CommandError::WrongType)?)?,
    };
    let next = current.checked_add(delta).ok_or(CommandError::Overflow)?;
    ks.replace(key, Value::String(next.to_string()));
    Ok(Value::Int(next))
}

/// INCR key
pub fn incr(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("incr", args, 1, Some(1))?;
    incr_by(ks, &parse_key(&args[0])?, 1)
}

/// INCRBY key increment
pub fn incrby(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("incrby", args, 2, Some(2))?;
    let delta = parse_int(&args[1])?;
    incr_by(ks, &parse_key(&args[0])?, delta)
}

/// DECR key
pub fn decr(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("decr", args, 1, Some(1))?;
    incr_by(ks, &parse_key(&args[0])?, -1)
}

/// DECRBY key decrement
pub fn decrby(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("decrby", args, 2, Some(2))?;
    let delta = parse_int(&args[1])?
        .checked_neg()
        .ok_or(CommandError::Overflow)?;
    incr_by(ks, &parse_key(&args[0])?, delta)
}

/// APPEND key value
///
/// Replies with the length of the string after the append.
pub fn append(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("append", args, 2, Some(2))?;
    let key = parse_key(&args[0])?;
    let suffix = args[1].as_payload().ok_or(CommandError::WrongType)?;

    let mut bytes = match ks.get(&key) {
        None => Vec::new(),
        Some(value) => value.as_payload().ok_or(CommandError::WrongType)?.to_vec(),
    };
    bytes.extend_from_slice(suffix);
    let len = bytes.len();

    let value = match String::from_utf8(bytes) {
        Ok(s) => Value::String(s),
        Err(e) => Value::Bytes(e.into_bytes()),
    };
    ks.replace(&key, value);
    Ok(Value::Int(len as i64))
}

/// STRLEN key
pub fn strlen(ks: &mut Keyspace, args: &[Value]) -> Reply {
    check_arity("strlen", args, 1, Some(1))?;
    match ks.get(&parse_key(&args[0])?) {
        None => Ok(Value::Int(0)),
        Some(value) => {
            let payload = value.as_payload().ok_or(CommandError::WrongType)?;
            Ok(Value::Int(payload.len() as i64))
        }
    }
}
