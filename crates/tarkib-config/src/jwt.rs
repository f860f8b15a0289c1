use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub signing_key: String,
    /// Access token lifetime in seconds.
    pub access_token_timeout: i64,
    pub audience: Vec<String>,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            signing_key: env::var("JWT_SIGNING_KEY")
                .unwrap_or_else(|_| "change-this-signing-key-in-production".to_string()),
            access_token_timeout: env::var("JWT_ACCESS_TOKEN_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            audience: env::var("JWT_AUDIENCE")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}
