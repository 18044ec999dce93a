//! User entity - a single user's identity, credentials, roles, and API key

use chrono::{DateTime, Utc};
use std::fmt;

use crate::entities::SessionSnapshot;
use crate::error::DomainError;
use crate::traits::SecurityUser;
use crate::value_objects::{derive_api_key, generate_api_key, PhoneNumber};

/// Baseline role granted to every new user
pub const DEFAULT_ROLE: &str = "ROLE_USER";

/// User record
///
/// `Default` gives the bare type defaults (no roles, empty API key, inactive);
/// use [`UserRecord::new`] for a usable record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserRecord {
    id: Option<i64>,
    username: String,
    name: Option<String>,
    phone: Option<PhoneNumber>,
    plain_password: Option<String>,
    password_hash: Option<String>,
    roles: Vec<String>,
    active: bool,
    api_key: String,
    last_active: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Create a new user
    ///
    /// The record gets a fresh API key, a one-time plain password equal to
    /// that key, the default role, and `last_active` set to now.
    pub fn new() -> Self {
        let api_key = generate_api_key();
        Self {
            plain_password: Some(api_key.clone()),
            api_key,
            roles: vec![DEFAULT_ROLE.to_string()],
            active: true,
            last_active: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// Replace the API key with a freshly generated one
    pub fn regenerate_api_key(&mut self) {
        self.api_key = generate_api_key();
    }

    /// Replace the API key with one derived from the given seed and time
    pub fn regenerate_api_key_with(&mut self, seed: &str, now: i64) {
        self.api_key = derive_api_key(seed, now);
    }

    /// Drop the plain-text password once it has been consumed
    pub fn erase_credentials(&mut self) {
        self.plain_password = None;
    }

    /// Salt used for credential hashing (always `None`, the hasher embeds its own)
    #[inline]
    pub fn salt(&self) -> Option<&str> {
        None
    }

    /// Label for human-facing rendering: the name when set, else the username
    pub fn display_label(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }

    /// Record activity now
    pub fn touch(&mut self) {
        self.last_active = Some(Utc::now());
    }

    // =========================================================================
    // Session snapshot
    // =========================================================================

    /// Take the partial snapshot kept in session storage
    pub fn to_session(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            username: self.username.clone(),
            password_hash: self.password_hash.clone(),
            active: self.active,
        }
    }

    /// Rebuild a record from a session snapshot
    ///
    /// Only `id`, `username`, `password_hash` and `active` are restored; every
    /// other field keeps its type default. Reload from the store for a full
    /// record.
    pub fn from_session(snapshot: SessionSnapshot) -> Self {
        Self {
            id: snapshot.id,
            username: snapshot.username,
            password_hash: snapshot.password_hash,
            active: snapshot.active,
            ..Self::default()
        }
    }

    /// Serialize the session snapshot to JSON
    pub fn session_json(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string(&self.to_session())?)
    }

    /// Rebuild a record from a JSON session snapshot
    pub fn from_session_json(json: &str) -> Result<Self, DomainError> {
        let snapshot: SessionSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_session(snapshot))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Assign the server-generated id (no-op once an id is present)
    pub fn assign_id(&mut self, id: i64) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    #[inline]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    #[inline]
    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    pub fn set_phone(&mut self, phone: Option<PhoneNumber>) {
        self.phone = phone;
    }

    #[inline]
    pub fn plain_password(&self) -> Option<&str> {
        self.plain_password.as_deref()
    }

    pub fn set_plain_password(&mut self, plain_password: Option<String>) {
        self.plain_password = plain_password;
    }

    /// Stored credential hash
    #[inline]
    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn set_password_hash(&mut self, password_hash: Option<String>) {
        self.password_hash = password_hash;
    }

    #[inline]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Replace the role set
    ///
    /// Duplicates are dropped keeping first occurrence order. An empty list
    /// falls back to [`DEFAULT_ROLE`].
    pub fn set_roles<I, S>(&mut self, roles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for role in roles {
            let role = role.into();
            if !unique.contains(&role) {
                unique.push(role);
            }
        }
        if unique.is_empty() {
            unique.push(DEFAULT_ROLE.to_string());
        }
        self.roles = unique;
    }

    /// Check if the user holds a role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[inline]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    #[inline]
    pub fn last_active(&self) -> Option<DateTime<Utc>> {
        self.last_active
    }

    pub fn set_last_active(&mut self, last_active: Option<DateTime<Utc>>) {
        self.last_active = last_active;
    }

    #[inline]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Set the timestamps maintained by the persistence boundary
    pub fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
    }
}

impl fmt::Display for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

impl SecurityUser for UserRecord {
    fn username(&self) -> &str {
        &self.username
    }

    fn credential_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    fn roles(&self) -> &[String] {
        &self.roles
    }

    fn erase_credentials(&mut self) {
        self.plain_password = None;
    }

    fn salt(&self) -> Option<&str> {
        None
    }
}
