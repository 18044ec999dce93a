//! Process-local session storage.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use user_core::{RepoResult, SessionSnapshot, SessionStore};

#[derive(Debug, Clone)]
struct Entry {
    snapshot: SessionSnapshot,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory session store with lazy expiry
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.sessions
            .read()
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(
        &self,
        session_id: &str,
        snapshot: &SessionSnapshot,
        ttl_seconds: u64,
    ) -> RepoResult<()> {
        let now = Instant::now();
        let expires_at = (ttl_seconds > 0).then(|| now + Duration::from_secs(ttl_seconds));

        let mut sessions = self.sessions.write();
        sessions.retain(|_, entry| !entry.is_expired(now));
        sessions.insert(
            session_id.to_string(),
            Entry {
                snapshot: snapshot.clone(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn load(&self, session_id: &str) -> RepoResult<Option<SessionSnapshot>> {
        let now = Instant::now();
        let mut sessions = self.sessions.write();
        if let Some(entry) = sessions.get(session_id) {
            if !entry.is_expired(now) {
                return Ok(Some(entry.snapshot.clone()));
            }
            sessions.remove(session_id);
        }
        Ok(None)
    }

    async fn remove(&self, session_id: &str) -> RepoResult<bool> {
        let now = Instant::now();
        Ok(self
            .sessions
            .write()
            .remove(session_id)
            .is_some_and(|entry| !entry.is_expired(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            id: Some(1),
            username: "jane@example.com".to_string(),
            password_hash: Some("$argon2id$hash".to_string()),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_save_load_remove() {
        let store = InMemorySessionStore::new();
        store.save("s1", &snapshot(), 60).await.unwrap();

        assert_eq!(store.load("s1").await.unwrap(), Some(snapshot()));
        assert_eq!(store.len(), 1);

        assert!(store.remove("s1").await.unwrap());
        assert!(!store.remove("s1").await.unwrap());
        assert_eq!(store.load("s1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_zero_ttl_never_expires() {
        let store = InMemorySessionStore::new();
        store.save("s1", &snapshot(), 0).await.unwrap();
        assert!(store.load("s1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_prunes_expired_sessions() {
        let store = InMemorySessionStore::new();
        store.sessions.write().insert(
            "stale".to_string(),
            Entry {
                snapshot: snapshot(),
                expires_at: Some(Instant::now()),
            },
        );

        store.save("fresh", &snapshot(), 60).await.unwrap();

        let sessions = store.sessions.read();
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key("fresh"));
    }

    #[test]
    fn test_expired_entry() {
        let now = Instant::now();
        let entry = Entry {
            snapshot: snapshot(),
            expires_at: Some(now),
        };
        assert!(entry.is_expired(now));
        assert!(!entry.is_expired(now - Duration::from_millis(1)));
    }
}
