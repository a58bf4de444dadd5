use actix_web::http::header::ContentType;
use actix_web::{error, http::StatusCode, HttpResponse};
use derive_more::{Display, Error};

use crate::http::error::write_error;

/// Authentication and authorization failures.
///
/// Every variant except [`AuthError::Forbidden`] means the caller has not
/// proven who it is and is answered with `401`; `Forbidden` means the caller
/// is known but lacks the rights for the resource and is answered with `403`.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[display("full authentication is required to access this resource")]
    Unauthorized,
    #[display("bad credentials")]
    BadCredentials,
    #[display("user is disabled")]
    Disabled,
    #[display("access is denied")]
    Forbidden,
}

impl AuthError {
    /// Returns true for failures handled by the authentication entry point.
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(self, AuthError::Forbidden)
    }
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::Unauthorized | AuthError::BadCredentials | AuthError::Disabled => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match write_error(self.status_code()) {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("failed to serialize error body: {}", e);
                HttpResponse::InternalServerError()
                    .content_type(ContentType::plaintext())
                    .body(e.to_string())
            }
        }
    }
}
