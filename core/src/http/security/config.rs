//! Core traits of the security filter chain.

use actix_web::dev::ServiceRequest;

use crate::http::error::AuthError;
use crate::http::security::user::User;

/// Establishes the identity behind a request.
pub trait Authenticator {
    /// Returns
    /// - `Ok(Some(user))` when valid credentials were presented,
    /// - `Ok(None)` when the request carries no credentials (anonymous),
    /// - `Err(_)` when credentials were presented but are invalid.
    fn authenticate(&self, req: &ServiceRequest) -> Result<Option<User>, AuthError>;
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    /// Forward the request to the protected handler.
    Granted,
    /// The request is anonymous and the resource needs an identity.
    AuthenticationRequired,
    /// The caller is authenticated but lacks the required rights.
    Denied,
}

/// Decides whether the (possibly anonymous) caller may access a request.
pub trait Authorizer {
    fn decide(&self, req: &ServiceRequest, user: Option<&User>) -> AuthorizationDecision;
}
