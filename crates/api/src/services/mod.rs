//! Startup and authorization services.

pub mod authorize;
pub mod seed;
