//! In-memory implementation of UserRepository
//!
//! Mirrors the PostgreSQL repository: sequential ids from 1, id ordering,
//! and unique `username` / `api_key`.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use user_core::{
    DomainError, RepoResult, SortDirection, UniqueField, UserQuery, UserRecord, UserRepository,
};

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    users: BTreeMap<i64, UserRecord>,
}

impl State {
    /// Find a unique column already held by a record other than `id`
    fn conflict(&self, user: &UserRecord, id: Option<i64>) -> Option<UniqueField> {
        self.users
            .iter()
            .filter(|(other_id, _)| Some(**other_id) != id)
            .find_map(|(_, other)| {
                if other.username() == user.username() {
                    Some(UniqueField::Username)
                } else if other.api_key() == user.api_key() {
                    Some(UniqueField::ApiKey)
                } else {
                    None
                }
            })
    }
}

/// In-memory user store
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

impl InMemoryUserRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.state.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find_where<F>(&self, predicate: F) -> Option<UserRecord>
    where
        F: Fn(&UserRecord) -> bool,
    {
        self.state
            .read()
            .users
            .values()
            .find(|user| predicate(*user))
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self, query: UserQuery) -> RepoResult<Vec<UserRecord>> {
        let state = self.state.read();
        let matching = state.users.values().filter(|user| query.matches(user)).cloned();

        Ok(match query.direction {
            SortDirection::Ascending => matching.collect(),
            SortDirection::Descending => matching.rev().collect(),
        })
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRecord>> {
        Ok(self.state.read().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>> {
        Ok(self.find_where(|user| user.username() == username))
    }

    async fn find_by_api_key(&self, api_key: &str) -> RepoResult<Option<UserRecord>> {
        Ok(self.find_where(|user| user.api_key() == api_key))
    }

    #[instrument(skip(self, user), fields(username = %user.username()))]
    async fn create(&self, user: &mut UserRecord) -> RepoResult<()> {
        if let Some(id) = user.id() {
            return Err(DomainError::AlreadyPersisted(id));
        }

        let mut state = self.state.write();
        if let Some(field) = state.conflict(user, None) {
            return Err(DomainError::UniquenessViolation { field });
        }

        state.last_id += 1;
        let id = state.last_id;
        let now = Utc::now();
        user.assign_id(id);
        user.set_timestamps(now, now);

        let mut stored = user.clone();
        stored.erase_credentials();
        state.users.insert(id, stored);

        debug!(id, "User created");
        Ok(())
    }

    async fn update(&self, user: &UserRecord) -> RepoResult<()> {
        let id = user.id().ok_or(DomainError::NotPersisted)?;

        let mut state = self.state.write();
        let created_at = match state.users.get(&id) {
            Some(existing) => existing.created_at().unwrap_or_else(Utc::now),
            None => return Err(DomainError::UserNotFound(id)),
        };
        if let Some(field) = state.conflict(user, Some(id)) {
            return Err(DomainError::UniquenessViolation { field });
        }

        let mut stored = user.clone();
        stored.erase_credentials();
        stored.set_timestamps(created_at, Utc::now());
        state.users.insert(id, stored);
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.state
            .write()
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::UserNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str) -> UserRecord {
        let mut user = UserRecord::new();
        user.set_username(username);
        user
    }

    #[tokio::test]
    async fn test_ids_are_sequential_from_one() {
        let repo = InMemoryUserRepository::new();
        for (expected, name) in [(1, "a@example.com"), (2, "b@example.com")] {
            let mut record = user(name);
            repo.create(&mut record).await.unwrap();
            assert_eq!(record.id(), Some(expected));
            assert!(record.created_at().is_some());
        }
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_query_all_is_id_descending() {
        let repo = InMemoryUserRepository::new();
        for name in ["a@example.com", "b@example.com", "c@example.com"] {
            repo.create(&mut user(name)).await.unwrap();
        }

        let ids: Vec<_> = repo
            .query_all()
            .await
            .unwrap()
            .iter()
            .filter_map(UserRecord::id)
            .collect();
        assert_eq!(ids, [3, 2, 1]);

        let ascending = repo
            .find_all(UserQuery::all().ordered(SortDirection::Ascending))
            .await
            .unwrap();
        assert_eq!(ascending[0].id(), Some(1));
    }

    #[tokio::test]
    async fn test_active_filter() {
        let repo = InMemoryUserRepository::new();
        let mut inactive = user("a@example.com");
        inactive.set_active(false);
        repo.create(&mut inactive).await.unwrap();
        repo.create(&mut user("b@example.com")).await.unwrap();

        let active = repo
            .find_all(UserQuery::all().with_active(true))
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].username(), "b@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(&mut user("a@example.com")).await.unwrap();

        let mut duplicate = user("a@example.com");
        let err = repo.create(&mut duplicate).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::UniquenessViolation {
                field: UniqueField::Username
            }
        ));
        assert_eq!(duplicate.id(), None);
    }

    #[tokio::test]
    async fn test_duplicate_api_key_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let mut first = user("a@example.com");
        repo.create(&mut first).await.unwrap();

        let mut second = user("b@example.com");
        second.set_api_key(first.api_key());
        let err = repo.create(&mut second).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::UniquenessViolation {
                field: UniqueField::ApiKey
            }
        ));
    }

    #[tokio::test]
    async fn test_plain_password_is_never_stored() {
        let repo = InMemoryUserRepository::new();
        let mut record = user("a@example.com");
        assert!(record.plain_password().is_some());
        repo.create(&mut record).await.unwrap();

        let stored = repo.find_by_username("a@example.com").await.unwrap().unwrap();
        assert_eq!(stored.plain_password(), None);
        assert_eq!(stored.api_key(), record.api_key());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = InMemoryUserRepository::new();
        let mut record = user("a@example.com");
        repo.create(&mut record).await.unwrap();

        record.set_name(Some("Jane".to_string()));
        repo.update(&record).await.unwrap();
        let stored = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.name(), Some("Jane"));
        assert_eq!(stored.created_at(), record.created_at());

        repo.delete(1).await.unwrap();
        assert!(repo.find_by_id(1).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(1).await,
            Err(DomainError::UserNotFound(1))
        ));
    }

    #[tokio::test]
    async fn test_update_requires_persisted_record() {
        let repo = InMemoryUserRepository::new();
        assert!(matches!(
            repo.update(&user("a@example.com")).await,
            Err(DomainError::NotPersisted)
        ));

        let mut record = user("a@example.com");
        repo.create(&mut record).await.unwrap();
        assert!(matches!(
            repo.create(&mut record).await,
            Err(DomainError::AlreadyPersisted(1))
        ));
    }

    #[tokio::test]
    async fn test_update_cannot_take_another_username() {
        let repo = InMemoryUserRepository::new();
        repo.create(&mut user("a@example.com")).await.unwrap();
        let mut second = user("b@example.com");
        repo.create(&mut second).await.unwrap();

        second.set_username("a@example.com");
        assert!(repo.update(&second).await.unwrap_err().is_conflict());
    }
}
