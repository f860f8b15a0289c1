//! Feature modules. Each has a `controller` (HTTP handlers), a `service`
//! (queries and business rules) and a `router`.

pub mod ads;
pub mod auth;
pub mod categories;
pub mod news;
