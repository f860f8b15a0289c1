//! # Tarkib Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing key, lifetime and audience
//! - [`policy`]: authorization model and policy file locations
//! - [`cors`]: allowed cross-origin callers
//! - [`rate_limit`]: per-IP rate limiting
//! - [`lockout`]: failed-login lockout thresholds
//! - [`server`]: listen port and public base URL
//!
//! ```ignore
//! use tarkib_config::{JwtConfig, PolicyConfig};
//!
//! let jwt = JwtConfig::from_env();
//! let policy = PolicyConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod lockout;
pub mod policy;
pub mod rate_limit;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use lockout::LockoutConfig;
pub use policy::PolicyConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
