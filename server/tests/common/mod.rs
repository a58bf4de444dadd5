#![allow(dead_code)]

//! Shared test setup: the service with its real security policy and
//! bcrypt at minimum cost.

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, App};
use base64::prelude::*;
use chrono::{DateTime, Utc};

use rest_security_core::http::security::SecurityHeaders;
use rest_security_server::handlers;
use rest_security_server::security::{demo_users, fast_password_encoder, SecurityPolicy};

pub fn test_policy() -> SecurityPolicy {
    let encoder = fast_password_encoder();
    let users = demo_users(&encoder).unwrap();
    SecurityPolicy::with_encoder(users, encoder)
}

pub async fn create_test_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    create_app_with(test_policy()).await
}

pub async fn create_app_with(
    policy: SecurityPolicy,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(policy.security_filter_chain())
            .wrap(SecurityHeaders::default())
            .configure(handlers::configure),
    )
    .await
}

/// Helper function to create Basic Auth header value.
pub fn basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", BASE64_STANDARD.encode(credentials))
}

/// Checks the JSON error body and returns its timestamp.
pub fn assert_error_body(body: &[u8], status: &str) -> DateTime<Utc> {
    let json: serde_json::Value = serde_json::from_slice(body).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 2, "unexpected fields in {}", json);
    assert_eq!(json["status"], status);

    let timestamp = json["timestamp"].as_str().unwrap();
    DateTime::parse_from_rfc3339(timestamp)
        .unwrap()
        .with_timezone(&Utc)
}
