//! Request DTOs
//!
//! Raw caller input. Filtering and group validation happen in the services
//! once the values are applied to a user record.

use serde::Deserialize;

/// Profile edit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditUser {
    pub username: String,
    pub name: Option<String>,
    /// Phone number as typed; separators are normalized away
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_user_from_json() {
        let edit: EditUser =
            serde_json::from_str(r#"{"username":"jane@example.com","name":"Jane"}"#).unwrap();
        assert_eq!(edit.username, "jane@example.com");
        assert_eq!(edit.name.as_deref(), Some("Jane"));
        assert_eq!(edit.phone, None);
    }
}
