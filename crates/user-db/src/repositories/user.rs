//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use user_core::{DomainError, RepoResult, UserQuery, UserRecord, UserRepository};

use crate::mappers::UserWrite;
use crate::models::UserModel;

use super::error::{map_db_error, map_write_error};

const USER_COLUMNS: &str = "id, username, name, phone, password_hash, roles, active, api_key, \
                            last_active, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> RepoResult<Option<UserRecord>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(UserRecord::from))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_all(&self, query: UserQuery) -> RepoResult<Vec<UserRecord>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE ($1::BOOLEAN IS NULL OR active = $1) \
             ORDER BY id {}",
            query.direction.as_sql()
        );

        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .bind(query.active)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        debug!(count = rows.len(), "Loaded users");
        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRecord>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(UserRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>> {
        self.find_one("username", username).await
    }

    #[instrument(skip(self, api_key))]
    async fn find_by_api_key(&self, api_key: &str) -> RepoResult<Option<UserRecord>> {
        self.find_one("api_key", api_key).await
    }

    #[instrument(skip(self, user), fields(username = %user.username()))]
    async fn create(&self, user: &mut UserRecord) -> RepoResult<()> {
        if let Some(id) = user.id() {
            return Err(DomainError::AlreadyPersisted(id));
        }

        let row = UserWrite::new(user);
        let (id, created_at, updated_at) = sqlx::query_as::<_, (i64, DateTime<Utc>, DateTime<Utc>)>(
            r"
            INSERT INTO users (username, name, phone, password_hash, roles, active, api_key,
                               last_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING id, created_at, updated_at
            ",
        )
        .bind(row.username)
        .bind(row.name)
        .bind(row.phone)
        .bind(row.password_hash)
        .bind(row.roles)
        .bind(row.active)
        .bind(row.api_key)
        .bind(row.last_active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        user.assign_id(id);
        user.set_timestamps(created_at, updated_at);
        debug!(id, "User created");
        Ok(())
    }

    #[instrument(skip(self, user), fields(id = ?user.id()))]
    async fn update(&self, user: &UserRecord) -> RepoResult<()> {
        let id = user.id().ok_or(DomainError::NotPersisted)?;
        let row = UserWrite::new(user);

        let result = sqlx::query(
            r"
            UPDATE users
            SET username = $2, name = $3, phone = $4, password_hash = $5, roles = $6,
                active = $7, api_key = $8, last_active = $9, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(row.username)
        .bind(row.name)
        .bind(row.phone)
        .bind(row.password_hash)
        .bind(row.roles)
        .bind(row.active)
        .bind(row.api_key)
        .bind(row.last_active)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        Ok(())
    }
}
