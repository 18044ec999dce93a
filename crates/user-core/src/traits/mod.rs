//! Traits at the domain boundary

mod repositories;
mod security;

pub use repositories::{
    RepoResult, SessionStore, SortDirection, UserQuery, UserRepository,
};
pub use security::SecurityUser;
