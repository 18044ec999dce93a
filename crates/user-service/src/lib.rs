//! # user-service
//!
//! Application layer: user lifecycle and authentication use cases over the
//! repository and session store traits.

pub mod dto;
pub mod services;

pub use dto::EditUser;
pub use services::{
    placeholder_username, AuthService, ServiceContext, ServiceError, ServiceResult, UserService,
};
