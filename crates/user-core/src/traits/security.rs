//! Security capability implemented by authenticatable users

/// What the authentication boundary needs from a user
pub trait SecurityUser {
    /// Login key
    fn username(&self) -> &str;

    /// Stored credential hash, if a password has been set
    fn credential_hash(&self) -> Option<&str>;

    /// Granted roles
    fn roles(&self) -> &[String];

    /// Clear plain-text credential material after it has been consumed
    fn erase_credentials(&mut self);

    /// Per-user salt; `None` when the hasher manages its own
    fn salt(&self) -> Option<&str>;
}
