//! Session storage module.
//!
//! Both stores implement the core `SessionStore` trait and hold the four-field
//! session snapshot of a user, never a full record.

mod memory_store;
mod redis_store;

pub use memory_store::InMemorySessionStore;
pub use redis_store::{session_key, RedisSessionStore, SESSION_PREFIX};
