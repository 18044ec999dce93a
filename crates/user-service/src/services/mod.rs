//! Business logic services

pub mod auth;
pub mod context;
pub mod error;
pub mod user;

pub use auth::AuthService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use user::{placeholder_username, UserService};
