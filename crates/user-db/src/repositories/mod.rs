//! Repository implementations
//!
//! PostgreSQL and in-memory implementations of the user repository trait
//! defined in user-core.

mod error;
mod memory;
mod user;

pub use memory::InMemoryUserRepository;
pub use user::PgUserRepository;
