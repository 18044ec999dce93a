//! Session snapshot of a user

use serde::{Deserialize, Serialize};

/// Minimal footprint of a user kept in session storage
///
/// Holds exactly the identity, credential hash, and active flag. It is not a
/// full record: anything else must be reloaded from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: Option<i64>,
    pub username: String,
    pub password_hash: Option<String>,
    pub active: bool,
}

impl SessionSnapshot {
    /// Check whether a reloaded user still matches this snapshot
    ///
    /// A changed username, credential hash, or active flag invalidates the
    /// session.
    pub fn matches(&self, user: &crate::entities::UserRecord) -> bool {
        self.id == user.id()
            && self.username == user.username()
            && self.password_hash.as_deref() == user.password_hash()
            && self.active == user.is_active()
    }
}

#[cfg(test)]
mod tests {
    use crate::entities::UserRecord;

    #[test]
    fn test_matches_same_user() {
        let mut user = UserRecord::new();
        user.assign_id(1);
        user.set_username("a@example.com");
        let snapshot = user.to_session();
        assert!(snapshot.matches(&user));
    }

    #[test]
    fn test_password_change_breaks_match() {
        let mut user = UserRecord::new();
        user.assign_id(1);
        user.set_password_hash(Some("old".to_string()));
        let snapshot = user.to_session();

        user.set_password_hash(Some("new".to_string()));
        assert!(!snapshot.matches(&user));
    }

    #[test]
    fn test_deactivation_breaks_match() {
        let mut user = UserRecord::new();
        user.assign_id(1);
        let snapshot = user.to_session();

        user.set_active(false);
        assert!(!snapshot.matches(&user));
    }
}
