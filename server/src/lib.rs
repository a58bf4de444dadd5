//! # REST Security Server
//!
//! Actix Web service secured by `rest-security-core`: one public route,
//! stateless HTTP Basic everywhere else, JSON 401/403 bodies.

pub mod config;
pub mod handlers;
pub mod security;
