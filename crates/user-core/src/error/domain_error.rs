//! Domain errors - error types for the domain layer

use std::fmt;

use thiserror::Error;
use validator::ValidationErrors;

use crate::value_objects::PhoneNumberError;

/// Column guarded by a unique constraint at the store boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueField {
    Username,
    ApiKey,
}

impl UniqueField {
    /// Field name as used in validation errors
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::ApiKey => "api_key",
        }
    }

    /// Map a database constraint name to the guarded field
    pub fn from_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            "unq_username" => Some(Self::Username),
            "unq_api_key" => Some(Self::ApiKey),
            _ => None,
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("User has not been persisted yet")]
    NotPersisted,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation failed: {0}")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Unique constraint violated on {field}")]
    UniquenessViolation { field: UniqueField },

    #[error("User already persisted with id {0}")]
    AlreadyPersisted(i64),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::NotPersisted => "NOT_PERSISTED",
            Self::ValidationFailure(_) => "VALIDATION_ERROR",
            Self::InvalidPhoneNumber(_) => "INVALID_PHONE_NUMBER",
            Self::UniquenessViolation { field } => match field {
                UniqueField::Username => "USERNAME_TAKEN",
                UniqueField::ApiKey => "API_KEY_COLLISION",
            },
            Self::AlreadyPersisted(_) => "ALREADY_PERSISTED",
            Self::PersistenceUnavailable(_) => "PERSISTENCE_UNAVAILABLE",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::NotPersisted)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailure(_) | Self::InvalidPhoneNumber(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UniquenessViolation { .. } | Self::AlreadyPersisted(_)
        )
    }
}

impl From<PhoneNumberError> for DomainError {
    fn from(err: PhoneNumberError) -> Self {
        match err {
            PhoneNumberError::Invalid(raw) => Self::InvalidPhoneNumber(raw),
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::UserNotFound(1).code(), "UNKNOWN_USER");
        assert_eq!(
            DomainError::UniquenessViolation {
                field: UniqueField::Username
            }
            .code(),
            "USERNAME_TAKEN"
        );
        assert_eq!(
            DomainError::UniquenessViolation {
                field: UniqueField::ApiKey
            }
            .code(),
            "API_KEY_COLLISION"
        );
    }

    #[test]
    fn test_predicates() {
        assert!(DomainError::UserNotFound(1).is_not_found());
        assert!(DomainError::InvalidPhoneNumber("x".into()).is_validation());
        assert!(DomainError::UniquenessViolation {
            field: UniqueField::ApiKey
        }
        .is_conflict());
        assert!(!DomainError::PersistenceUnavailable("down".into()).is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::UserNotFound(123);
        assert_eq!(err.to_string(), "User not found: 123");

        let err = DomainError::UniquenessViolation {
            field: UniqueField::Username,
        };
        assert_eq!(err.to_string(), "Unique constraint violated on username");
    }

    #[test]
    fn test_unique_field_from_constraint() {
        assert_eq!(
            UniqueField::from_constraint("unq_username"),
            Some(UniqueField::Username)
        );
        assert_eq!(
            UniqueField::from_constraint("unq_api_key"),
            Some(UniqueField::ApiKey)
        );
        assert_eq!(UniqueField::from_constraint("users_pkey"), None);
    }

    #[test]
    fn test_from_phone_error() {
        let err: DomainError = PhoneNumberError::Invalid("12".into()).into();
        assert!(matches!(err, DomainError::InvalidPhoneNumber(raw) if raw == "12"));
    }
}
