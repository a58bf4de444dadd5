//! Error types and JSON error bodies.

mod auth_error;
mod error_body;

pub use auth_error::AuthError;
pub use error_body::{status_label, write_error, ErrorBody};
