//! # user-cache
//!
//! Session snapshot storage for authenticated users.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: Partial user snapshots keyed by session id, in Redis
//!   or in process memory
//!
//! ## Example
//!
//! ```ignore
//! use user_cache::{RedisPool, RedisPoolConfig, RedisSessionStore};
//! use user_core::SessionStore;
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = RedisSessionStore::new(pool);
//!
//! sessions.save(&session_id, &user.to_session(), 3600).await?;
//! let snapshot = sessions.load(&session_id).await?;
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export session types
pub use session::{session_key, InMemorySessionStore, RedisSessionStore, SESSION_PREFIX};
