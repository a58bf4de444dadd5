//! Failure hooks of the security filter chain.
//!
//! The filter chain calls an [`AuthenticationEntryPoint`] when a request has
//! no valid identity and an [`AccessDeniedHandler`] when the identity is valid
//! but not sufficient. The defaults answer with a JSON
//! [`ErrorBody`](crate::http::error::ErrorBody).

use actix_web::http::header::{HeaderValue, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::http::error::{write_error, AuthError};
use crate::http::security::http_basic::HttpBasicConfig;

/// Starts authentication for a request that has no valid identity.
pub trait AuthenticationEntryPoint {
    fn commence(&self, req: &HttpRequest, error: &AuthError) -> Result<HttpResponse, Error>;
}

/// Answers a request whose identity lacks the required rights.
pub trait AccessDeniedHandler {
    fn handle(&self, req: &HttpRequest, error: &AuthError) -> Result<HttpResponse, Error>;
}

/// Writes `401` with `{"status": "401 UNAUTHORIZED", "timestamp": ...}`.
///
/// With a Basic challenge configured, also sets `WWW-Authenticate`.
#[derive(Debug, Clone, Default)]
pub struct JsonAuthenticationEntryPoint {
    challenge: Option<HttpBasicConfig>,
}

impl JsonAuthenticationEntryPoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `WWW-Authenticate: Basic realm=...` challenge to responses.
    pub fn challenge(mut self, config: HttpBasicConfig) -> Self {
        self.challenge = Some(config);
        self
    }
}

impl AuthenticationEntryPoint for JsonAuthenticationEntryPoint {
    fn commence(&self, req: &HttpRequest, error: &AuthError) -> Result<HttpResponse, Error> {
        log::debug!("{} {}: {}", req.method(), req.path(), error);
        let mut resp = write_error(StatusCode::UNAUTHORIZED)?;
        if let Some(config) = &self.challenge {
            resp.headers_mut().insert(
                WWW_AUTHENTICATE,
                config
                    .www_authenticate_header()
                    .parse::<HeaderValue>()
                    .map_err(actix_web::error::ErrorInternalServerError)?,
            );
        }
        Ok(resp)
    }
}

/// Writes `403` with `{"status": "403 FORBIDDEN", "timestamp": ...}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAccessDeniedHandler;

impl AccessDeniedHandler for JsonAccessDeniedHandler {
    fn handle(&self, req: &HttpRequest, error: &AuthError) -> Result<HttpResponse, Error> {
        log::debug!("{} {}: {}", req.method(), req.path(), error);
        Ok(write_error(StatusCode::FORBIDDEN)?)
    }
}
