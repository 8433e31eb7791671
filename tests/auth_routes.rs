//! Router-level tests: access middleware, who-am-i endpoints and payment verification.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Map, Value, json};
use std::time::Duration;
use tower::ServiceExt;

use sujhav_auth::api::v1::dto::me::MeResponse;
use sujhav_auth::api::v1::dto::payments::VerifyPaymentResponse;
use sujhav_auth::app::{build_router, build_state};
use sujhav_auth::config::{AppEnv, Config};
use sujhav_auth::error::ErrorResponse;
use sujhav_auth::services::auth::JwtIssuer;
use sujhav_auth::services::payment::PaymentVerifier;

const SECRET: &str = "integration-secret";
const PAYMENT_SECRET: &str = "payment-secret";

fn config(payment_key_secret: Option<&str>) -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        jwt_secret: SECRET.to_string(),
        auth_cookie_name: "token".to_string(),
        access_token_leeway_seconds: 0,
        request_timeout: Duration::from_secs(5),
        request_body_limit_bytes: 64 * 1024,
        payment_key_secret: payment_key_secret.map(str::to_string),
    }
}

fn app() -> Router {
    let config = config(Some(PAYMENT_SECRET));
    build_router(build_state(&config), &config)
}

fn token(user_id: &str, role: &str) -> String {
    let mut extra = Map::new();
    extra.insert("role".to_string(), Value::from(role));
    extra.insert("name".to_string(), Value::from("Test User"));
    JwtIssuer::new(SECRET, 3600)
        .issue(Value::from(user_id), extra)
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> axum::http::request::Builder {
    Request::builder().method("GET").uri(uri)
}

#[tokio::test]
async fn health_is_public() {
    let resp = app()
        .oneshot(get("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn me_with_cookie_returns_principal() {
    let resp = app()
        .oneshot(
            get("/api/v1/me")
                .header(header::COOKIE, format!("token={}", token("u-7", "student")))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: MeResponse = body_json(resp).await;
    assert_eq!(body.user.id, json!("u-7"));
    assert_eq!(body.user.role(), Some("student"));
    assert_eq!(body.user.get("name"), Some(&json!("Test User")));
    assert!(body.user.get("userId").is_none());
}

#[tokio::test]
async fn me_with_bearer_returns_principal() {
    let resp = app()
        .oneshot(
            get("/api/v1/me")
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", token("u-8", "student")),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: MeResponse = body_json(resp).await;
    assert_eq!(body.user.id, json!("u-8"));
}

#[tokio::test]
async fn cookie_beats_header() {
    let resp = app()
        .oneshot(
            get("/api/v1/me")
                .header(header::COOKIE, format!("token={}", token("cookie-user", "student")))
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", token("header-user", "student")),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body: MeResponse = body_json(resp).await;
    assert_eq!(body.user.id, json!("cookie-user"));
}

#[tokio::test]
async fn missing_and_invalid_credentials_look_the_same() {
    let missing = app()
        .oneshot(get("/api/v1/me").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let forged = JwtIssuer::new("not-the-secret", 3600)
        .issue(Value::from("u-1"), Map::new())
        .unwrap();
    let invalid = app()
        .oneshot(
            get("/api/v1/me")
                .header(header::AUTHORIZATION, format!("Bearer {forged}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);

    let missing: ErrorResponse = body_json(missing).await;
    let invalid: ErrorResponse = body_json(invalid).await;
    assert_eq!(missing, invalid);
    assert_eq!(missing.error, "Unauthorized");
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let resp = app()
        .oneshot(
            get("/api/v1/me")
                .header(
                    header::AUTHORIZATION,
                    format!("Token {}", token("u-1", "admin")),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_me_allows_admin() {
    let resp = app()
        .oneshot(
            get("/api/admin/me")
                .header(header::COOKIE, format!("token={}", token("a-1", "admin")))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: MeResponse = body_json(resp).await;
    assert_eq!(body.user.id, json!("a-1"));
    assert_eq!(body.user.role(), Some("admin"));
}

#[tokio::test]
async fn admin_me_forbids_non_admin() {
    let resp = app()
        .oneshot(
            get("/api/admin/me")
                .header(header::COOKIE, format!("token={}", token("t-1", "teacher")))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: ErrorResponse = body_json(resp).await;
    assert_eq!(body.error, "Forbidden: admin access required");
}

#[tokio::test]
async fn admin_me_requires_credential() {
    let resp = app()
        .oneshot(get("/api/admin/me").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = body_json(resp).await;
    assert_eq!(body.error, "Unauthorized");
}

#[tokio::test]
async fn responses_carry_security_headers_and_request_id() {
    let resp = app()
        .oneshot(get("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let headers = resp.headers();
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["cache-control"], "no-store");
    assert!(headers.contains_key("x-request-id"));
}

fn verify_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/payments/verify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn payment_with_valid_signature_succeeds() {
    let signature = PaymentVerifier::new(PAYMENT_SECRET)
        .sign("order_9", "pay_9")
        .unwrap();

    let resp = app()
        .oneshot(verify_request(json!({
            "razorpay_order_id": "order_9",
            "razorpay_payment_id": "pay_9",
            "razorpay_signature": signature,
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: VerifyPaymentResponse = body_json(resp).await;
    assert!(body.success);
    assert!(body.error.is_none());
}

#[tokio::test]
async fn payment_with_tampered_signature_fails() {
    let signature = PaymentVerifier::new(PAYMENT_SECRET)
        .sign("order_9", "pay_9")
        .unwrap();

    let resp = app()
        .oneshot(verify_request(json!({
            "razorpay_order_id": "order_9",
            "razorpay_payment_id": "pay_10",
            "razorpay_signature": signature,
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: VerifyPaymentResponse = body_json(resp).await;
    assert!(!body.success);
    assert_eq!(body.error.as_deref(), Some("Invalid payment signature"));
}

#[tokio::test]
async fn payment_with_missing_field_fails() {
    let resp = app()
        .oneshot(verify_request(json!({
            "razorpay_order_id": "order_9",
            "razorpay_signature": "00",
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: VerifyPaymentResponse = body_json(resp).await;
    assert_eq!(body.error.as_deref(), Some("Missing razorpay_payment_id"));
}

#[tokio::test]
async fn payment_without_configured_secret_is_unavailable() {
    let config = config(None);
    let app = build_router(build_state(&config), &config);

    let resp = app
        .oneshot(verify_request(json!({
            "razorpay_order_id": "o",
            "razorpay_payment_id": "p",
            "razorpay_signature": "00",
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: VerifyPaymentResponse = body_json(resp).await;
    assert!(!body.success);
}
