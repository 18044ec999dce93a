//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{SessionSnapshot, UserRecord};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// Ordering direction on the user id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    /// Most recently created first
    #[default]
    Descending,
}

impl SortDirection {
    /// SQL keyword for this direction
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Query descriptor for listing users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserQuery {
    pub direction: SortDirection,
    /// Restrict to active (`Some(true)`) or inactive (`Some(false)`) users
    pub active: Option<bool>,
}

impl UserQuery {
    /// All users, most recently created first
    pub fn all() -> Self {
        Self::default()
    }

    /// Order by id with the given direction
    #[must_use]
    pub fn ordered(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Restrict to users with the given active flag
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Check whether a record satisfies the filter part of the query
    pub fn matches(&self, user: &UserRecord) -> bool {
        self.active.map_or(true, |active| user.is_active() == active)
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List users matching a query descriptor
    async fn find_all(&self, query: UserQuery) -> RepoResult<Vec<UserRecord>>;

    /// List all users ordered by id descending
    async fn query_all(&self) -> RepoResult<Vec<UserRecord>> {
        self.find_all(UserQuery::all()).await
    }

    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRecord>>;

    /// Find user by username (login key)
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>>;

    /// Find user by API key
    async fn find_by_api_key(&self, api_key: &str) -> RepoResult<Option<UserRecord>>;

    /// Persist a new user, assigning its id and timestamps
    async fn create(&self, user: &mut UserRecord) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &UserRecord) -> RepoResult<()>;

    /// Delete a user
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

// ============================================================================
// Session Store
// ============================================================================

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session snapshot with a time to live
    async fn save(
        &self,
        session_id: &str,
        snapshot: &SessionSnapshot,
        ttl_seconds: u64,
    ) -> RepoResult<()>;

    /// Load a session snapshot
    async fn load(&self, session_id: &str) -> RepoResult<Option<SessionSnapshot>>;

    /// Remove a session, returning whether it existed
    async fn remove(&self, session_id: &str) -> RepoResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_is_descending_unfiltered() {
        let query = UserQuery::all();
        assert_eq!(query.direction, SortDirection::Descending);
        assert_eq!(query.active, None);
        assert_eq!(query.direction.as_sql(), "DESC");
    }

    #[test]
    fn test_query_builders() {
        let query = UserQuery::all()
            .ordered(SortDirection::Ascending)
            .with_active(true);
        assert_eq!(query.direction.as_sql(), "ASC");
        assert_eq!(query.active, Some(true));
    }

    /// Records the descriptor handed to `find_all`
    struct RecordingRepo {
        seen: std::sync::Mutex<Option<UserQuery>>,
    }

    #[async_trait]
    impl UserRepository for RecordingRepo {
        async fn find_all(&self, query: UserQuery) -> RepoResult<Vec<UserRecord>> {
            *self.seen.lock().unwrap() = Some(query);
            Ok(Vec::new())
        }
        async fn find_by_id(&self, _id: i64) -> RepoResult<Option<UserRecord>> {
            Ok(None)
        }
        async fn find_by_username(&self, _username: &str) -> RepoResult<Option<UserRecord>> {
            Ok(None)
        }
        async fn find_by_api_key(&self, _api_key: &str) -> RepoResult<Option<UserRecord>> {
            Ok(None)
        }
        async fn create(&self, _user: &mut UserRecord) -> RepoResult<()> {
            Ok(())
        }
        async fn update(&self, _user: &UserRecord) -> RepoResult<()> {
            Ok(())
        }
        async fn delete(&self, id: i64) -> RepoResult<()> {
            Err(DomainError::UserNotFound(id))
        }
    }

    #[tokio::test]
    async fn test_query_all_uses_unfiltered_descending_query() {
        let repo = RecordingRepo {
            seen: std::sync::Mutex::new(None),
        };
        assert!(repo.query_all().await.unwrap().is_empty());
        assert_eq!(*repo.seen.lock().unwrap(), Some(UserQuery::all()));
    }

    #[test]
    fn test_query_matches_active_filter() {
        let mut user = UserRecord::new();
        assert!(UserQuery::all().matches(&user));
        assert!(UserQuery::all().with_active(true).matches(&user));

        user.set_active(false);
        assert!(!UserQuery::all().with_active(true).matches(&user));
        assert!(UserQuery::all().with_active(false).matches(&user));
    }
}
