//! Application error types
//!
//! Unified error handling for the entire application.

use user_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User account is disabled")]
    InactiveUser,

    #[error("Session expired or invalid")]
    InvalidSession,

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Redis errors
    #[error("Cache error: {0}")]
    Cache(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get error code
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InactiveUser => "INACTIVE_USER",
            Self::InvalidSession => "INVALID_SESSION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if the caller can fix this error by changing its input
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidCredentials
            | Self::InactiveUser
            | Self::InvalidSession
            | Self::NotFound(_) => true,
            Self::Domain(e) => e.is_not_found() || e.is_validation() || e.is_conflict(),
            Self::Database(_) | Self::Cache(_) | Self::Internal(_) | Self::Config(_) => false,
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use user_core::UniqueField;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidCredentials.error_code(), "INVALID_CREDENTIALS");
        assert_eq!(AppError::NotFound("user".to_string()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::Domain(DomainError::UserNotFound(3)).error_code(),
            "UNKNOWN_USER"
        );
    }

    #[test]
    fn test_is_client_error() {
        assert!(AppError::InvalidCredentials.is_client_error());
        assert!(AppError::InactiveUser.is_client_error());
        assert!(AppError::Domain(DomainError::UniquenessViolation {
            field: UniqueField::Username
        })
        .is_client_error());
        assert!(!AppError::Database("down".to_string()).is_client_error());
        assert!(!AppError::Domain(DomainError::PersistenceUnavailable("down".into()))
            .is_client_error());
    }

    #[test]
    fn test_domain_error_is_transparent() {
        let err = AppError::from(DomainError::UserNotFound(9));
        assert_eq!(err.to_string(), "User not found: 9");
    }

    #[test]
    fn test_internal_wraps_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err = AppError::internal(io);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "Internal error");
    }
}
