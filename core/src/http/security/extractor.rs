//! Extractors for the principal established by the filter chain.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthError;
use crate::http::security::User;

/// The authenticated principal of the current request.
///
/// Extraction fails with [`AuthError::Unauthorized`] on anonymous requests,
/// which the filter chain answers through its entry point.
///
/// # Usage
/// ```ignore
/// async fn handler(user: AuthenticatedUser) -> impl Responder {
///     format!("Hello, {}!", user.get_username())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    pub fn new(user: User) -> Self {
        AuthenticatedUser(user)
    }

    pub fn into_inner(self) -> User {
        self.0
    }

    /// Fails with [`AuthError::Forbidden`] unless the user has one of `roles`.
    pub fn require_any_role(&self, roles: &[&str]) -> Result<(), AuthError> {
        if self.0.has_any_role(roles) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Fails with [`AuthError::Forbidden`] unless the user has one of `authorities`.
    pub fn require_any_authority(&self, authorities: &[&str]) -> Result<(), AuthError> {
        if self.0.has_any_authority(authorities) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<User>().cloned() {
            Some(user) => ready(Ok(AuthenticatedUser(user))),
            None => ready(Err(AuthError::Unauthorized)),
        }
    }
}

/// The principal if the request is authenticated, `None` otherwise.
#[derive(Debug, Clone)]
pub struct OptionalUser(Option<User>);

impl OptionalUser {
    pub fn into_inner(self) -> Option<User> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl Deref for OptionalUser {
    type Target = Option<User>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OptionalUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalUser(req.extensions().get::<User>().cloned())))
    }
}
