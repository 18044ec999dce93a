//! User record <-> model mapper

use chrono::{DateTime, Utc};
use user_core::{PhoneNumber, UserRecord};

use crate::models::UserModel;

/// Convert UserModel to UserRecord
impl From<UserModel> for UserRecord {
    fn from(model: UserModel) -> Self {
        let mut user = UserRecord::default();
        user.assign_id(model.id);
        user.set_username(model.username);
        user.set_name(model.name);
        user.set_phone(model.phone.map(PhoneNumber::new));
        user.set_password_hash(model.password_hash);
        user.set_roles(model.roles);
        user.set_active(model.active);
        user.set_api_key(model.api_key);
        user.set_last_active(model.last_active);
        user.set_timestamps(model.created_at, model.updated_at);
        user
    }
}

/// Persisted columns of a record, borrowed for insert and update
///
/// `plain_password` has no column and never reaches this struct.
pub struct UserWrite<'a> {
    pub username: &'a str,
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub roles: &'a [String],
    pub active: bool,
    pub api_key: &'a str,
    pub last_active: Option<DateTime<Utc>>,
}

impl<'a> UserWrite<'a> {
    pub fn new(user: &'a UserRecord) -> Self {
        Self {
            username: user.username(),
            name: user.name(),
            phone: user.phone().map(PhoneNumber::as_str),
            password_hash: user.password_hash(),
            roles: user.roles(),
            active: user.is_active(),
            api_key: user.api_key(),
            last_active: user.last_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> UserModel {
        let now = Utc::now();
        UserModel {
            id: 7,
            username: "jane@example.com".to_string(),
            name: Some("Jane".to_string()),
            phone: Some("+14155550132".to_string()),
            password_hash: Some("$argon2id$hash".to_string()),
            roles: vec!["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()],
            active: false,
            api_key: "a".repeat(40),
            last_active: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_model_to_record() {
        let model = model();
        let created_at = model.created_at;
        let user = UserRecord::from(model);

        assert_eq!(user.id(), Some(7));
        assert_eq!(user.username(), "jane@example.com");
        assert_eq!(user.phone().map(PhoneNumber::as_str), Some("+14155550132"));
        assert!(user.has_role("ROLE_ADMIN"));
        assert!(!user.is_active());
        assert_eq!(user.plain_password(), None);
        assert_eq!(user.created_at(), Some(created_at));
    }

    #[test]
    fn test_write_skips_plain_password() {
        let mut user = UserRecord::new();
        user.set_username("jane@example.com");
        let write = UserWrite::new(&user);

        assert_eq!(write.username, "jane@example.com");
        assert_eq!(write.api_key, user.api_key());
        assert_eq!(write.roles, ["ROLE_USER".to_string()]);
        assert_eq!(write.password_hash, None);
    }
}
