//! # user-db
//!
//! Storage layer implementing the user repository trait with PostgreSQL via
//! SQLx, plus an in-memory repository with the same semantics.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use user_db::{create_pool, run_migrations, PgUserRepository, PoolConfig};
//! use user_core::UserRepository;
//!
//! async fn example(config: &user_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from(config)).await?;
//!     run_migrations(&pool).await?;
//!     let users = PgUserRepository::new(pool);
//!
//!     for user in users.query_all().await? {
//!         println!("{}", user.username());
//!     }
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{InMemoryUserRepository, PgUserRepository};
