//! Dependency wiring
//!
//! Builds the service context for the configured backends.

use std::sync::Arc;

use tracing::info;
use user_cache::{InMemorySessionStore, RedisPool, RedisPoolConfig, RedisSessionStore};
use user_common::{AppConfig, AppError, StoreBackend};
use user_core::{SessionStore, UserRepository};
use user_db::{create_pool, run_migrations, InMemoryUserRepository, PgUserRepository, PoolConfig};
use user_service::ServiceContext;

/// Initialize the stores and create the service context
pub async fn build_context(config: &AppConfig) -> Result<ServiceContext, AppError> {
    let user_repo: Arc<dyn UserRepository> = match config.store {
        StoreBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is not set".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&PoolConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            Arc::new(PgUserRepository::new(pool))
        }
        StoreBackend::Memory => {
            info!("Using in-memory user store");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let session_store: Arc<dyn SessionStore> =
        match RedisPoolConfig::from_cache_config(&config.cache) {
            Some(redis_config) => {
                let pool = RedisPool::new(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
                Arc::new(RedisSessionStore::new(pool))
            }
            None => Arc::new(InMemorySessionStore::new()),
        };

    Ok(ServiceContext::new(user_repo, session_store).with_session_ttl(config.session.ttl_seconds))
}
