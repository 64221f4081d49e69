//! Argument normalization and parsing.
//!
//! Commands never see raw caller input. Before a command is executed or
//! queued, its arguments are normalized into a flat list of string payloads:
//!
//! | Input | Normalized |
//! |-------|------------|
//! | `Array([..])` | elements, flattened recursively |
//! | `Int(n)` / `Float(f)` | `String` of its decimal form |
//! | `Bool(b)` | `String("true")` / `String("false")` |
//! | `Null` | `String("")` |
//! | `String` / `Bytes` | unchanged |

use std::borrow::Cow;

use strata_core::{CommandError, Value};

/// Flatten and stringify caller arguments
pub fn normalize_args(args: Vec<Value>) -> Vec<Value> {
    let mut out = Vec::with_capacity(args.len());
    for arg in args {
        flatten_into(arg, &mut out);
    }
    out
}

/// Normalize a value about to be stored directly, bypassing a command
///
/// Scalars are stringified as in [`normalize_args`]. An `Array` stays a
/// list, with its elements flattened and stringified.
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(normalize_args(items)),
        other => stringify(other),
    }
}

fn flatten_into(arg: Value, out: &mut Vec<Value>) {
    match arg {
        Value::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        other => out.push(stringify(other)),
    }
}

fn stringify(scalar: Value) -> Value {
    match scalar {
        Value::Null => Value::String(String::new()),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Int(i) => Value::String(i.to_string()),
        Value::Float(f) => Value::String(f.to_string()),
        other => other,
    }
}

/// Check that `args` holds between `min` and `max` (inclusive) arguments
pub fn check_arity(
    command: &str,
    args: &[Value],
    min: usize,
    max: Option<usize>,
) -> Result<(), CommandError> {
    let within_max = max.map_or(true, |max| args.len() <= max);
    if args.len() < min || !within_max {
        return Err(CommandError::wrong_arity(command));
    }
    Ok(())
}

/// Key named by an argument
///
/// Keys are stored as strings, so binary keys must be valid UTF-8. Decoding
/// them lossily would map distinct keys onto the same entry.
pub fn parse_key(arg: &Value) -> Result<Cow<'_, str>, CommandError> {
    match arg {
        Value::Bytes(b) => std::str::from_utf8(b)
            .map(Cow::Borrowed)
            .map_err(|_| CommandError::InvalidKey),
        other => Ok(text(other)),
    }
}

/// Text form of an argument, used for option names and messages
pub fn text(arg: &Value) -> Cow<'_, str> {
    match arg {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Bytes(b) => String::from_utf8_lossy(b),
        Value::Int(i) => Cow::Owned(i.to_string()),
        Value::Float(f) => Cow::Owned(f.to_string()),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Null => Cow::Borrowed(""),
        Value::Array(_) => Cow::Borrowed(""),
    }
}

/// Parse an argument as a signed 64-bit integer
pub fn parse_int(arg: &Value) -> Result<i64, CommandError> {
    match arg {
        Value::Int(i) => Ok(*i),
        other => match other.as_payload() {
            Some(bytes) => parse_int_bytes(bytes),
            None => Err(CommandError::NotAnInteger),
        },
    }
}

/// Parse a stored payload as a signed 64-bit integer
///
/// Rejects surrounding whitespace and a leading `+`, matching how the
/// store's INCR family reads values.
pub fn parse_int_bytes(bytes: &[u8]) -> Result<i64, CommandError> {
    let s = std::str::from_utf8(bytes).map_err(|_| CommandError::NotAnInteger)?;
    if s.is_empty() || s.starts_with('+') || s.trim() != s {
        return Err(CommandError::NotAnInteger);
    }
    s.parse::<i64>().map_err(|_| CommandError::NotAnInteger)
}
