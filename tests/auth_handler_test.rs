mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, empty_request, json_request, TestApp};
use preservation_windows_backend::config::{AppConfig, JwtConfig};
use preservation_windows_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use serde_json::json;
use tower::ServiceExt;

async fn register(app: &TestApp, body: serde_json::Value) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(json_request("POST", "/api/register", None, body))
        .await
        .unwrap()
}

async fn login(app: &TestApp, email: &str, password: &str) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            None,
            json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap()
}

fn sam() -> serde_json::Value {
    json!({ "username": "sam", "email": "sam@example.com", "password": "s3cret-pass" })
}

#[tokio::test]
async fn test_register_returns_user_without_password() {
    let app = TestApp::new();
    let response = register(&app, sam()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["username"], "sam");
    assert_eq!(body["email"], "sam@example.com");
    assert_eq!(body["_id"].as_str().unwrap().len(), 24);
    assert!(body.get("password").is_none());

    let stored = app.users.users.lock().unwrap()[0].clone();
    assert!(stored.password_hash.starts_with("$argon2"));
    assert_ne!(stored.password_hash, "s3cret-pass");
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let app = TestApp::new();
    assert_eq!(register(&app, sam()).await.status(), StatusCode::CREATED);

    let response = register(
        &app,
        json!({ "username": "other", "email": "sam@example.com", "password": "another" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "User already exists" }));
    assert_eq!(app.users.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_requires_every_field() {
    let app = TestApp::new();
    for body in [
        json!({ "username": "", "email": "sam@example.com", "password": "pw" }),
        json!({ "username": "sam", "email": "sam@example.com" }),
        json!({}),
    ] {
        let response = register(&app, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "All fields are required");
    }
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_login_returns_verifiable_token() {
    let app = TestApp::new();
    register(&app, sam()).await;

    let response = login(&app, "sam@example.com", "s3cret-pass").await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = body_json(response).await["token"].as_str().unwrap().to_string();
    let claims = app.jwt_utils.validate_token(&token).unwrap();
    assert_eq!(claims.email, "sam@example.com");
    assert_eq!(claims.iss, "preservation-windows");

    let stored_id = app.users.users.lock().unwrap()[0].id.unwrap().to_hex();
    assert_eq!(claims.sub, stored_id);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    register(&app, sam()).await;

    let wrong_password = login(&app, "sam@example.com", "not-it").await;
    let unknown_email = login(&app, "nobody@example.com", "s3cret-pass").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong_password).await, body_json(unknown_email).await);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::new();
    let response = login(&app, "", "pw").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "All fields are required");
}

#[tokio::test]
async fn test_missing_or_malformed_token() {
    let app = TestApp::new();
    for auth in [None, Some("Basic dXNlcjpwYXNz"), Some("Bearer ")] {
        let response = app
            .router
            .clone()
            .oneshot(empty_request("GET", "/api/jobs", auth))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({ "error": "Missing or malformed JWT" }));
    }
}

#[tokio::test]
async fn test_invalid_or_expired_token() {
    let app = TestApp::new();

    let foreign = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "a-completely-different-signing-secret-value".to_string(),
        ..JwtConfig::default()
    })
    .generate_token("65f0c0ffee0000000000abcd", "x@example.com")
    .unwrap();

    let expired = JwtTokenUtilsImpl::new(JwtConfig {
        token_expiration_hours: -1,
        ..JwtConfig::default()
    })
    .generate_token("65f0c0ffee0000000000abcd", "x@example.com")
    .unwrap();

    for token in ["garbage".to_string(), foreign, expired] {
        let auth = format!("Bearer {}", token);
        let response = app
            .router
            .clone()
            .oneshot(empty_request("GET", "/api/jobs", Some(&auth)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({ "error": "Invalid or expired JWT" }));
    }
}

#[tokio::test]
async fn test_valid_token_passes() {
    let app = TestApp::new();
    let auth = app.bearer();
    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/jobs", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_unknown_api_route() {
    let app = TestApp::new();

    let anonymous = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/nothing-here", None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let auth = app.bearer();
    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/nothing-here", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_static_spa_with_index_fallback() {
    let dist = tempfile::tempdir().unwrap();
    std::fs::write(dist.path().join("index.html"), "<html>spa</html>").unwrap();
    std::fs::write(dist.path().join("app.js"), "console.log('hi')").unwrap();

    let app = TestApp::with_config(AppConfig {
        static_dir: dist.path().to_string_lossy().to_string(),
        ..AppConfig::default()
    });

    let asset = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/app.js", None))
        .await
        .unwrap();
    assert_eq!(asset.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(asset.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"console.log('hi')");

    // client-side route served by the SPA shell
    let route = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/jobs/42/edit", None))
        .await
        .unwrap();
    assert_eq!(route.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(route.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<html>spa</html>");
}
