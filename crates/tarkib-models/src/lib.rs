//! # Tarkib Models
//!
//! Database rows and request/response DTOs shared by the API and the CLI.

pub mod admins;
pub mod ads;
pub mod categories;
pub mod language;
pub mod news;

pub use admins::MessageResponse;
pub use language::{Language, UnsupportedLanguage};
