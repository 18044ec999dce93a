//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use user_core::{DomainError, UniqueField};

/// Convert SQLx error to DomainError, keeping the driver message
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::PersistenceUnavailable(e.to_string())
}

/// Map unique violations on named constraints to the guarded field
pub fn map_write_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if let Some(field) = db_err.constraint().and_then(UniqueField::from_constraint) {
                return DomainError::UniquenessViolation { field };
            }
        }
    }
    map_db_error(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_message_is_kept() {
        let err = map_write_error(SqlxError::PoolTimedOut);
        assert!(matches!(
            err,
            DomainError::PersistenceUnavailable(msg) if msg == SqlxError::PoolTimedOut.to_string()
        ));
    }
}
