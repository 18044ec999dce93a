//! Authentication service
//!
//! Handles password login, API key authentication, session refresh, and logout.

use tracing::{info, instrument, warn};
use user_common::AppError;
use user_core::filters::sanitize;
use user_core::value_objects::is_well_formed_api_key;
use user_core::{validate, UserRecord, ValidationGroup};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with username and password
    ///
    /// Returns the new session id with the authenticated user.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<(String, UserRecord)> {
        let mut probe = UserRecord::default();
        probe.set_username(sanitize(username));
        probe.set_plain_password(Some(password.to_string()));
        validate(&probe, &[ValidationGroup::Login])?;

        let mut user = self
            .ctx
            .user_repo()
            .find_by_username(probe.username())
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                AppError::InvalidCredentials
            })?;

        if !user.is_active() {
            warn!(user_id = ?user.id(), "Login failed: user disabled");
            return Err(AppError::InactiveUser.into());
        }

        let Some(hash) = user.password_hash() else {
            warn!(user_id = ?user.id(), "Login failed: no password set");
            return Err(AppError::InvalidCredentials.into());
        };

        if let Err(e) = self.ctx.password_service().verify_or_error(password, hash) {
            warn!(user_id = ?user.id(), "Login failed: invalid password");
            return Err(e.into());
        }

        user.erase_credentials();
        user.touch();
        self.ctx.user_repo().update(&user).await?;

        let session_id = Uuid::new_v4().to_string();
        self.ctx
            .session_store()
            .save(&session_id, &user.to_session(), self.ctx.session_ttl())
            .await?;

        info!(user_id = ?user.id(), "User logged in successfully");
        Ok((session_id, user))
    }

    /// Authenticate with an API key
    #[instrument(skip(self, api_key))]
    pub async fn authenticate_api_key(&self, api_key: &str) -> ServiceResult<UserRecord> {
        if !is_well_formed_api_key(api_key) {
            return Err(AppError::InvalidCredentials.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_api_key(api_key)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active() {
            warn!(user_id = ?user.id(), "API key rejected: user disabled");
            return Err(AppError::InactiveUser.into());
        }

        Ok(user)
    }

    /// Reload the user behind a session
    ///
    /// The session is dropped when the user is gone or its username,
    /// credential hash, or active flag changed since login.
    #[instrument(skip(self, session_id))]
    pub async fn refresh_session(&self, session_id: &str) -> ServiceResult<UserRecord> {
        let snapshot = self
            .ctx
            .session_store()
            .load(session_id)
            .await?
            .ok_or(AppError::InvalidSession)?;

        let current = match snapshot.id {
            Some(id) => self.ctx.user_repo().find_by_id(id).await?,
            None => None,
        };

        match current {
            Some(user) if snapshot.matches(&user) => {
                self.ctx
                    .session_store()
                    .save(session_id, &snapshot, self.ctx.session_ttl())
                    .await?;
                Ok(user)
            }
            _ => {
                warn!(user_id = ?snapshot.id, "Session invalidated: user changed");
                self.ctx.session_store().remove(session_id).await?;
                Err(AppError::InvalidSession.into())
            }
        }
    }

    /// End a session, returning whether it existed
    #[instrument(skip(self, session_id))]
    pub async fn logout(&self, session_id: &str) -> ServiceResult<bool> {
        let removed = self.ctx.session_store().remove(session_id).await?;
        if removed {
            info!("User logged out");
        }
        Ok(removed)
    }
}
