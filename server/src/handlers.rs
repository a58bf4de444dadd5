//! Demo endpoints.

use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;

use rest_security_core::http::error::AuthError;
use rest_security_core::http::security::{AuthenticatedUser, OptionalUser};

/// Principal as returned by `/auth/me`.
#[derive(Debug, Serialize)]
pub struct Principal {
    pub username: String,
    pub roles: Vec<String>,
    pub authorities: Vec<String>,
}

impl From<&AuthenticatedUser> for Principal {
    fn from(user: &AuthenticatedUser) -> Self {
        Principal {
            username: user.get_username().to_string(),
            roles: user.get_roles().to_vec(),
            authorities: user.get_authorities().to_vec(),
        }
    }
}

/// Public greeting. Greets by name when valid credentials were sent.
#[get("/auth/welcome")]
pub async fn welcome(user: OptionalUser) -> impl Responder {
    match user.as_ref() {
        Some(user) => HttpResponse::Ok().body(format!("Welcome, {}!", user.get_username())),
        None => HttpResponse::Ok().body("Welcome!"),
    }
}

#[get("/auth/me")]
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(Principal::from(&user))
}

/// ADMIN only; other users get 403 through the access-denied handler.
#[get("/admin/reports")]
pub async fn reports(user: AuthenticatedUser) -> Result<HttpResponse, AuthError> {
    user.require_any_role(&["ADMIN"])?;
    Ok(HttpResponse::Ok().body(format!("Reports for {}", user.get_username())))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(welcome).service(me).service(reports);
}
