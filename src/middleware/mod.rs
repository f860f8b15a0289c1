//! Request middleware and extractors.
//!
//! - [`gate`]: role-based authorization for every `/v1` route
//! - [`auth`]: [`auth::AuthUser`] extractor for handlers that need the caller
//!
//! The gate runs before routing to a handler, so by the time an extractor
//! runs the caller is already known to be allowed.

pub mod auth;
pub mod gate;
