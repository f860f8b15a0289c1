//! Per-IP rate limiting for the public API.
//!
//! Two token buckets are configured: a general one for every `/v1` route and
//! a stricter one for the login endpoints.
//!
//! - `RATE_LIMIT_ENABLED` (default: true)
//! - `RATE_LIMIT_GENERAL_PER_SECOND` (default: 2)
//! - `RATE_LIMIT_GENERAL_BURST_SIZE` (default: 30)
//! - `RATE_LIMIT_AUTH_PER_SECOND` (default: 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE` (default: 5)

use governor::middleware::NoOpMiddleware;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

pub type IpGovernorConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Keys are peer IPs, so the server must be served with connect info.
    pub enabled: bool,
    /// Seconds between token replenishments for general endpoints.
    pub general_per_second: u64,
    pub general_burst_size: u32,
    /// Seconds between token replenishments for login endpoints.
    pub auth_per_second: u64,
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            general_per_second: 2,
            general_burst_size: 30,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn build(per_second: u64, burst_size: u32) -> Option<IpGovernorConfig> {
    GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst_size)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_or("RATE_LIMIT_ENABLED", defaults.enabled),
            general_per_second: env_or("RATE_LIMIT_GENERAL_PER_SECOND", defaults.general_per_second),
            general_burst_size: env_or("RATE_LIMIT_GENERAL_BURST_SIZE", defaults.general_burst_size),
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    /// Governor settings for general routes, keyed by peer IP.
    ///
    /// Returns `None` when a rate or burst of zero was configured.
    #[must_use]
    pub fn general_governor_config(&self) -> Option<IpGovernorConfig> {
        build(self.general_per_second, self.general_burst_size)
    }

    /// Governor settings for the login routes, keyed by peer IP.
    #[must_use]
    pub fn auth_governor_config(&self) -> Option<IpGovernorConfig> {
        build(self.auth_per_second, self.auth_burst_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.general_per_second, 2);
        assert_eq!(config.general_burst_size, 30);
        assert_eq!(config.auth_per_second, 10);
        assert_eq!(config.auth_burst_size, 5);
    }

    #[test]
    fn test_governor_configs_build() {
        let config = RateLimitConfig::default();
        assert!(config.general_governor_config().is_some());
        assert!(config.auth_governor_config().is_some());
    }

    #[test]
    fn test_zero_burst_is_rejected() {
        let config = RateLimitConfig {
            general_burst_size: 0,
            ..RateLimitConfig::default()
        };
        assert!(config.general_governor_config().is_none());
    }
}
