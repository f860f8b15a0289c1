//! # Tarkib CLI
//!
//! Super-admin account management that has no HTTP surface: creating the
//! first super-admin and lifting a block set after repeated failed logins.
//!
//! ```ignore
//! use tarkib_cli::superadmin;
//!
//! superadmin::create(&pool, "+998901234567", "secret").await?;
//! superadmin::unblock(&pool, "+998901234567").await?;
//! ```

pub mod superadmin;
