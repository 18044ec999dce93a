//! Session snapshot storage in Redis.
//!
//! Each session is one key holding the JSON snapshot, expiring after the
//! session TTL.

use async_trait::async_trait;
use tracing::{debug, instrument};

use user_core::{DomainError, RepoResult, SessionSnapshot, SessionStore};

use crate::pool::{RedisPool, RedisPoolError};

/// Key prefix for user sessions
pub const SESSION_PREFIX: &str = "user_session:";

/// Redis key for a session id
#[must_use]
pub fn session_key(session_id: &str) -> String {
    format!("{SESSION_PREFIX}{session_id}")
}

impl From<RedisPoolError> for DomainError {
    fn from(err: RedisPoolError) -> Self {
        match err {
            RedisPoolError::Serialization(e) => DomainError::Serialization(e.to_string()),
            other => DomainError::CacheError(other.to_string()),
        }
    }
}

/// Redis-backed session store
#[derive(Debug, Clone)]
pub struct RedisSessionStore {
    pool: RedisPool,
}

impl RedisSessionStore {
    /// Create a new session store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    #[instrument(skip(self, snapshot))]
    async fn save(
        &self,
        session_id: &str,
        snapshot: &SessionSnapshot,
        ttl_seconds: u64,
    ) -> RepoResult<()> {
        // SETEX rejects a zero TTL
        let ttl = (ttl_seconds > 0).then_some(ttl_seconds);
        self.pool.set(&session_key(session_id), snapshot, ttl).await?;
        debug!(user_id = ?snapshot.id, "Session saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn load(&self, session_id: &str) -> RepoResult<Option<SessionSnapshot>> {
        Ok(self.pool.get_value(&session_key(session_id)).await?)
    }

    #[instrument(skip(self))]
    async fn remove(&self, session_id: &str) -> RepoResult<bool> {
        let removed = self.pool.delete(&session_key(session_id)).await?;
        debug!(removed, "Session removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key() {
        assert_eq!(session_key("abc"), "user_session:abc");
    }

    #[test]
    fn test_pool_errors_map_to_domain() {
        let err: DomainError = RedisPoolError::CreatePool("bad url".to_string()).into();
        assert!(matches!(err, DomainError::CacheError(_)));

        let json_err = serde_json::from_str::<SessionSnapshot>("{").unwrap_err();
        let err: DomainError = RedisPoolError::Serialization(json_err).into();
        assert!(matches!(err, DomainError::Serialization(_)));
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RedisSessionStore>();
    }
}
