//! Access decisions and the JSON access-denied handler.

mod common;

use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{Duration, Utc};

use common::{assert_error_body, basic_auth, create_test_app};

#[actix_web::test]
async fn test_admin_reports_allowed_for_admin() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/admin/reports")
        .insert_header((AUTHORIZATION, basic_auth("admin", "admin")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "Reports for admin");
}

#[actix_web::test]
async fn test_admin_reports_forbidden_for_user() {
    let app = create_test_app().await;
    let before = Utc::now();

    let req = test::TestRequest::get()
        .uri("/admin/reports")
        .insert_header((AUTHORIZATION, basic_auth("user", "user")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "application/json");

    let timestamp = assert_error_body(&test::read_body(resp).await, "403 FORBIDDEN");
    assert!(timestamp >= before - Duration::seconds(1));
    assert!(timestamp <= Utc::now() + Duration::seconds(1));
}

#[actix_web::test]
async fn test_admin_reports_without_credentials_is_401() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/admin/reports").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_error_body(&test::read_body(resp).await, "401 UNAUTHORIZED");
}

#[actix_web::test]
async fn test_user_without_roles_can_use_authenticated_routes() {
    let app = create_test_app().await;

    let me = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header((AUTHORIZATION, basic_auth("guest", "guest")))
        .to_request();
    assert_eq!(test::call_service(&app, me).await.status(), StatusCode::OK);

    let reports = test::TestRequest::get()
        .uri("/admin/reports")
        .insert_header((AUTHORIZATION, basic_auth("guest", "guest")))
        .to_request();
    assert_eq!(
        test::call_service(&app, reports).await.status(),
        StatusCode::FORBIDDEN
    );
}
