//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::fmt;
use user_common::AppError;
use user_core::validation::username_taken;
use user_core::{DomainError, UniqueField};
use validator::ValidationErrors;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or storage failure
    Domain(DomainError),

    /// Application error (auth, hashing, etc.)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Field-level validation failures, if this is a validation error
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Domain(DomainError::ValidationFailure(errors)) => Some(errors),
            _ => None,
        }
    }

    /// Get the error code
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
        }
    }

    /// Check if the caller can fix this error by changing its input
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_not_found() || e.is_validation() || e.is_conflict(),
            Self::App(e) => e.is_client_error(),
            Self::NotFound { .. } => true,
        }
    }
}

impl From<DomainError> for ServiceError {
    /// A taken username surfaces as a field error on `username`; an API key
    /// collision stays a storage error.
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UniquenessViolation {
                field: UniqueField::Username,
            } => Self::Domain(DomainError::ValidationFailure(username_taken())),
            other => Self::Domain(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Domain(DomainError::ValidationFailure(errors))
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("User", 123);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.is_client_error());
        assert!(err.to_string().contains("User not found: 123"));
    }

    #[test]
    fn test_username_conflict_becomes_field_error() {
        let err = ServiceError::from(DomainError::UniquenessViolation {
            field: UniqueField::Username,
        });
        let errors = err.validation_errors().expect("validation error");
        let username = &errors.field_errors()["username"][0];
        assert_eq!(username.code, "unique");
        assert_eq!(username.message.as_deref(), Some("usernameTaken"));
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_api_key_conflict_stays_storage_error() {
        let err = ServiceError::from(DomainError::UniquenessViolation {
            field: UniqueField::ApiKey,
        });
        assert!(err.validation_errors().is_none());
        assert_eq!(err.error_code(), "API_KEY_COLLISION");
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::not_found("User", 456).into();
        assert_eq!(app_err.error_code(), "NOT_FOUND");

        let app_err: AppError = ServiceError::from(AppError::InvalidCredentials).into();
        assert!(matches!(app_err, AppError::InvalidCredentials));
    }
}
