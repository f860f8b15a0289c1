//! # Tarkib Auth
//!
//! Request authorization for the Tarkib news API.
//!
//! - [`claims`]: the [`Role`] enum and the verified [`ClaimSet`]
//! - [`token`]: HS256 codec with RFC 3339 `exp` claims
//! - [`resolver`]: `Authorization` header to [`Role`]
//! - [`policy`]: casbin-backed `(role, path, method)` table
//! - [`decision`]: combines the above into a [`Decision`]
//!
//! ```ignore
//! use tarkib_auth::{PolicyTable, authorize};
//!
//! let policy = PolicyTable::load("config/rbac_model.conf", "config/policy.csv").await?;
//! let decision = authorize(header, "/v1/news/create", "POST", key, &policy);
//! ```

pub mod claims;
pub mod decision;
pub mod policy;
pub mod resolver;
pub mod token;

pub use claims::{ClaimSet, Role};
pub use decision::{Decision, authorize};
pub use policy::{EnforceError, PolicyTable};
pub use resolver::resolve_role;
pub use token::{DecodeError, IssueError, decode, issue};
