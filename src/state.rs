use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use tarkib_auth::PolicyTable;
use tarkib_config::{CorsConfig, JwtConfig, LockoutConfig, PolicyConfig, RateLimitConfig};
use tarkib_db::{DbConfig, init_db_pool};

use crate::modules::auth::lockout::LoginAttemptTracker;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub policy: PolicyTable,
    pub login_attempts: Arc<LoginAttemptTracker>,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

impl AppState {
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        policy: PolicyTable,
        lockout_config: LockoutConfig,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
    ) -> Self {
        Self {
            db,
            jwt_config,
            policy,
            login_attempts: Arc::new(LoginAttemptTracker::new(lockout_config)),
            cors_config,
            rate_limit_config,
        }
    }

    pub fn signing_key(&self) -> &[u8] {
        self.jwt_config.signing_key.as_bytes()
    }
}

/// Builds state from the environment. Fails if the database is unreachable
/// or the policy files cannot be loaded.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db_config = DbConfig::from_env().context("DATABASE_URL must be set")?;
    let db = init_db_pool(&db_config)
        .await
        .context("failed to connect to database")?;

    let policy_config = PolicyConfig::from_env();
    let policy = PolicyTable::load(&policy_config.model_path, &policy_config.policy_path)
        .await
        .with_context(|| {
            format!(
                "failed to load policy from {} and {}",
                policy_config.model_path, policy_config.policy_path
            )
        })?;

    Ok(AppState::new(
        db,
        JwtConfig::from_env(),
        policy,
        LockoutConfig::from_env(),
        CorsConfig::from_env(),
        RateLimitConfig::from_env(),
    ))
}
