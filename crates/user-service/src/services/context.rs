//! Service context - dependency container for services

use std::sync::Arc;

use user_common::PasswordService;
use user_core::{SessionStore, UserRepository};

/// Default session lifetime in seconds
pub const DEFAULT_SESSION_TTL: u64 = 3600;

/// Service context containing all dependencies
///
/// Cheap to clone; the store handles are shared.
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    session_store: Arc<dyn SessionStore>,
    password_service: PasswordService,
    session_ttl: u64,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(user_repo: Arc<dyn UserRepository>, session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            user_repo,
            session_store,
            password_service: PasswordService::new(),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    /// Set the session lifetime in seconds (0 keeps sessions until logout)
    #[must_use]
    pub fn with_session_ttl(mut self, ttl_seconds: u64) -> Self {
        self.session_ttl = ttl_seconds;
        self
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the session store
    pub fn session_store(&self) -> &dyn SessionStore {
        self.session_store.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    pub fn session_ttl(&self) -> u64 {
        self.session_ttl
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("user_repo", &"dyn UserRepository")
            .field("session_store", &"dyn SessionStore")
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}
