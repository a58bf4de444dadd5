//! # REST Security Core
//!
//! Stateless HTTP Basic authentication and request authorization for Actix Web.
//!
//! Failures never redirect: an unauthenticated request is answered by the
//! [`AuthenticationEntryPoint`](http::security::AuthenticationEntryPoint) and
//! an authenticated-but-forbidden one by the
//! [`AccessDeniedHandler`](http::security::AccessDeniedHandler), both of which
//! write a small JSON [`ErrorBody`](http::error::ErrorBody) by default.
//!
//! ## Modules
//!
//! - [`http::security`] - Authentication, authorization, and middleware
//! - [`http::error`] - Error types and the JSON error responder

pub mod http;
