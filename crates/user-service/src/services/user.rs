//! User service
//!
//! Lifecycle of user records: creation, profile edits, passwords, API keys.

use tracing::{info, instrument};

use user_core::filters::{sanitize, sanitize_opt};
use user_core::{validate, PhoneNumber, UserRecord, ValidationGroup};

use crate::dto::EditUser;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Email-shaped username for a record created without one
///
/// Derived from the API key, so it is unique whenever the key is.
pub fn placeholder_username(user: &UserRecord) -> String {
    format!("{}@users.invalid", user.api_key())
}

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, id: i64) -> ServiceResult<UserRecord> {
        self.ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))
    }

    /// Persist a freshly constructed record under a placeholder username
    ///
    /// The seeded one-time password (the API key) is stored hashed, so the
    /// record can log in with its API key as password.
    #[instrument(skip(self))]
    pub async fn create_default(&self) -> ServiceResult<UserRecord> {
        let mut user = UserRecord::new();
        user.set_username(placeholder_username(&user));
        if let Some(password) = user.plain_password() {
            let hash = self.ctx.password_service().hash(password)?;
            user.set_password_hash(Some(hash));
        }
        user.erase_credentials();

        self.ctx.user_repo().create(&mut user).await?;

        info!(user_id = ?user.id(), "Default user created");
        Ok(user)
    }

    /// Create a user with a username and password
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> ServiceResult<UserRecord> {
        let mut user = UserRecord::new();
        user.set_username(sanitize(username));
        user.set_plain_password(Some(password.to_string()));
        validate(
            &user,
            &[ValidationGroup::Restore, ValidationGroup::CreatePassword],
        )?;

        let hash = self.ctx.password_service().hash(password)?;
        user.set_password_hash(Some(hash));
        user.erase_credentials();

        self.ctx.user_repo().create(&mut user).await?;

        info!(user_id = ?user.id(), "User registered");
        Ok(user)
    }

    /// Apply a profile edit
    #[instrument(skip(self, edit))]
    pub async fn edit(&self, id: i64, edit: EditUser) -> ServiceResult<UserRecord> {
        let mut user = self.load(id).await?;

        user.set_username(sanitize(&edit.username));
        user.set_name(sanitize_opt(edit.name.as_deref()));
        user.set_phone(edit.phone.as_deref().map(PhoneNumber::new));
        validate(&user, &[ValidationGroup::Edit])?;

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = id, "User profile updated");
        Ok(user)
    }

    /// Replace a user's password
    #[instrument(skip(self, password))]
    pub async fn change_password(&self, id: i64, password: &str) -> ServiceResult<UserRecord> {
        let mut user = self.load(id).await?;

        user.set_plain_password(Some(password.to_string()));
        validate(&user, &[ValidationGroup::ChangePassword])?;

        let hash = self.ctx.password_service().hash(password)?;
        user.set_password_hash(Some(hash));
        user.erase_credentials();

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = id, "Password changed");
        Ok(user)
    }

    /// Issue a new API key, returning it
    #[instrument(skip(self))]
    pub async fn regenerate_api_key(&self, id: i64) -> ServiceResult<String> {
        let mut user = self.load(id).await?;
        user.regenerate_api_key();

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = id, "API key regenerated");
        Ok(user.api_key().to_string())
    }

    /// Enable or disable a user
    #[instrument(skip(self))]
    pub async fn set_active(&self, id: i64, active: bool) -> ServiceResult<UserRecord> {
        let mut user = self.load(id).await?;
        user.set_active(active);

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = id, active, "User active flag changed");
        Ok(user)
    }

    /// All users, most recently created first
    pub async fn list(&self) -> ServiceResult<Vec<UserRecord>> {
        Ok(self.ctx.user_repo().query_all().await?)
    }

    /// Look up a user for password restore
    #[instrument(skip(self))]
    pub async fn find_for_restore(&self, username: &str) -> ServiceResult<Option<UserRecord>> {
        let mut probe = UserRecord::default();
        probe.set_username(sanitize(username));
        validate(&probe, &[ValidationGroup::Restore])?;

        Ok(self
            .ctx
            .user_repo()
            .find_by_username(probe.username())
            .await?)
    }
}
