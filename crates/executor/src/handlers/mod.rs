//! Built-in command handlers.
//!
//! Each handler is a plain `fn(&mut Keyspace, &[Value]) -> Reply` and follows
//! Redis semantics and reply texts.

use std::sync::Arc;

use crate::Command;

pub mod connection;
pub mod keys;
pub mod lists;
pub mod strings;

fn entry(name: &'static str, command: impl Command + 'static) -> (&'static str, Arc<dyn Command>) {
    (name, Arc::new(command))
}

/// Every built-in command, keyed by lowercase name
pub(crate) fn builtins() -> Vec<(&'static str, Arc<dyn Command>)> {
    vec![
        // Connection
        entry("ping", connection::ping),
        entry("echo", connection::echo),
        entry("watch", connection::watch),
        entry("unwatch", connection::unwatch),
        // Strings
        entry("get", strings::get),
        entry("set", strings::set),
        entry("mget", strings::mget),
        entry("mset", strings::mset),
        entry("incr", strings::incr),
        entry("incrby", strings::incrby),
        entry("decr", strings::decr),
        entry("decrby", strings::decrby),
        entry("append", strings::append),
        entry("strlen", strings::strlen),
        // Keys
        entry("del", keys::del),
        entry("exists", keys::exists),
        entry("expire", keys::expire),
        entry("pexpire", keys::pexpire),
        entry("ttl", keys::ttl),
        entry("pttl", keys::pttl),
        entry("persist", keys::persist),
        entry("type", keys::key_type),
        entry("dbsize", keys::dbsize),
        // Lists
        entry("lpush", lists::lpush),
        entry("rpush", lists::rpush),
        entry("lpop", lists::lpop),
        entry("rpop", lists::rpop),
        entry("lrange", lists::lrange),
        entry("llen", lists::llen),
    ]
}
