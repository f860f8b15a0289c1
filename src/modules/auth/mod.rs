pub mod controller;
pub mod lockout;
pub mod router;
pub mod service;
