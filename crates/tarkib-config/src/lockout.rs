//! Failed-login lockout configuration.
//!
//! - `LOGIN_MAX_FAILED_ATTEMPTS`: failures inside one window before the
//!   identity is locked (default: 3)
//! - `LOGIN_ATTEMPT_WINDOW_SECS`: length of the counting window (default: 900)
//! - `LOGIN_LOCKOUT_SECS`: how long a locked identity stays locked (default: 900)

use std::env;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockoutConfig {
    pub max_failed_attempts: u32,
    pub attempt_window: Duration,
    pub lockout: Duration,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 3,
            attempt_window: Duration::from_secs(900),
            lockout: Duration::from_secs(900),
        }
    }
}

impl LockoutConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_failed_attempts: env::var("LOGIN_MAX_FAILED_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &u32| *v > 0)
                .unwrap_or(defaults.max_failed_attempts),
            attempt_window: env::var("LOGIN_ATTEMPT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.attempt_window),
            lockout: env::var("LOGIN_LOCKOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.lockout),
        }
    }
}
