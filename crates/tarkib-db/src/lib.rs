//! # Tarkib DB
//!
//! PostgreSQL pool initialization and migrations.
//!
//! ```ignore
//! use tarkib_db::{DbConfig, init_db_pool};
//!
//! let pool = init_db_pool(&DbConfig::from_env()?).await?;
//! ```

use std::env;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub database_url: String,
    /// `PG_POOL_MAX`, default 10.
    pub max_connections: u32,
}

impl DbConfig {
    /// Reads `DATABASE_URL` and `PG_POOL_MAX`.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            max_connections: env::var("PG_POOL_MAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10),
        })
    }
}

/// Opens a connection pool. The returned pool is cheap to clone and is
/// stored once in application state.
pub async fn init_db_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await?;

    tracing::info!(max_connections = config.max_connections, "database pool ready");
    Ok(pool)
}

/// Applies the embedded migrations from `./migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
