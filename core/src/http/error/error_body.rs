//! JSON body written for authentication and authorization failures.

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Error payload returned on 401 and 403 responses.
///
/// Serializes as `{"status": "401 UNAUTHORIZED", "timestamp": "<RFC 3339 instant>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    status: String,
    timestamp: DateTime<Utc>,
}

impl ErrorBody {
    /// Builds a body for `status` stamped with the current instant.
    pub fn new(status: StatusCode) -> Self {
        Self::at(status, Utc::now())
    }

    /// Builds a body for `status` stamped with `timestamp`.
    pub fn at(status: StatusCode, timestamp: DateTime<Utc>) -> Self {
        ErrorBody {
            status: status_label(status),
            timestamp,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Formats a status as its code followed by the upper-case reason,
/// e.g. `404 NOT_FOUND`.
pub fn status_label(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!(
            "{} {}",
            status.as_u16(),
            reason.to_uppercase().replace([' ', '-'], "_")
        ),
        None => status.as_u16().to_string(),
    }
}

/// Writes an [`ErrorBody`] for `status` as an `application/json` response.
///
/// Serialization errors are returned to the caller untouched.
pub fn write_error(status: StatusCode) -> Result<HttpResponse, serde_json::Error> {
    let body = serde_json::to_vec(&ErrorBody::new(status))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::json())
        .body(body))
}
