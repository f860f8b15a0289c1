//! # Tarkib Core
//!
//! Core types shared across the Tarkib news API:
//!
//! - [`errors`]: application error type with HTTP response conversion
//! - [`pagination`]: page/limit helpers for list endpoints
//! - [`password`]: bcrypt password hashing and verification

pub mod errors;
pub mod pagination;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
