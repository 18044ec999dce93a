//! # user-core
//!
//! Domain layer containing the user record, value objects, validation groups,
//! input filters, and repository traits.
//! This crate has zero dependencies on infrastructure (database, cache, etc.).

pub mod entities;
pub mod error;
pub mod filters;
pub mod traits;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{SessionSnapshot, UserRecord, DEFAULT_ROLE};
pub use error::{DomainError, UniqueField};
pub use traits::{
    RepoResult, SecurityUser, SessionStore, SortDirection, UserQuery, UserRepository,
};
pub use validation::{validate, ValidationGroup};
pub use value_objects::{
    derive_api_key, generate_api_key, PhoneNumber, PhoneNumberError, API_KEY_LENGTH,
};
