//! # Tarkib API
//!
//! Backend for a bilingual (Uzbek and Russian) news site, built with Axum
//! and PostgreSQL.
//!
//! ## Access control
//!
//! Every route under `/v1` passes through a single authorization gate
//! ([`middleware::gate`]) before any handler runs. The gate reads the raw
//! `Authorization` header, resolves it to one of three roles and checks
//! `(role, path, method)` against a casbin policy table:
//!
//! ```text
//! unauthorized   anonymous readers
//!     ↑ inherits
//! admin          content editors (news, categories, sources)
//!     ↑ inherits
//! super-admin    manages admins and advertisements
//! ```
//!
//! Super-admin logins are guarded by a per-phone-number lockout
//! ([`modules::auth::lockout`]).
//!
//! ## Layout
//!
//! ```text
//! src/
//! ├── middleware/     # authorization gate and the AuthUser extractor
//! ├── modules/
//! │   ├── auth/      # logins, admin management, lockout
//! │   ├── categories/# categories, subcategories, sources
//! │   ├── news/      # bilingual articles
//! │   └── ads/       # advertisements and view counts
//! ├── docs.rs        # OpenAPI
//! ├── logging.rs     # tracing subscriber and request logs
//! ├── metrics.rs     # Prometheus recorder
//! └── router.rs      # route tree
//! ```
//!
//! Super-admins are created from the command line only:
//!
//! ```bash
//! cargo run --bin tarkib-cli -- create-superadmin
//! ```

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use tarkib_auth;
pub use tarkib_config;
pub use tarkib_core;
pub use tarkib_db;
pub use tarkib_models;
