//! HTTP-level tests for the inbound adapter.
//!
//! Exercises the full middleware stack (router, rate limiter, error mapping)
//! against the mock ports, using `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use booking_gateway::signature;

use crate::service_tests::tests::{TEST_SECRET, harness};

use super::HttpServer;

fn app() -> Router {
    HttpServer::new(harness().service).router()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_answers_ok() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({"status": "OK"}));
}

#[tokio::test]
async fn order_creation_answers_201_with_gateway_order() {
    let response = app()
        .oneshot(post_json("/api/payment/order", r#"{"amount": 500000}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["amount"], 500000);
    assert_eq!(json["currency"], "INR");
    assert_eq!(json["status"], "created");
    assert!(json["id"].as_str().unwrap().starts_with("order_"));
}

#[tokio::test]
async fn invalid_amount_answers_400() {
    for body in [
        r#"{"amount": -5}"#,
        r#"{"amount": "12abc"}"#,
        r#"{"amount": 12.5}"#,
        r#"{}"#,
    ] {
        let response = app()
            .oneshot(post_json("/api/payment/order", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Invalid amount"));
    }
}

#[tokio::test]
async fn correct_signature_answers_verified_true() {
    let sig = signature::sign_payment("order_ABC", "pay_XYZ", TEST_SECRET);
    let body = serde_json::json!({
        "razorpay_order_id": "order_ABC",
        "razorpay_payment_id": "pay_XYZ",
        "razorpay_signature": sig,
    });

    let response = app()
        .oneshot(post_json("/api/payment/verify", &body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["verified"], true);
}

#[tokio::test]
async fn wrong_signature_answers_verified_false_400() {
    let body = serde_json::json!({
        "razorpay_order_id": "order_ABC",
        "razorpay_payment_id": "pay_XYZ",
        "razorpay_signature": "0".repeat(64),
    });

    let response = app()
        .oneshot(post_json("/api/payment/verify", &body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["verified"], false);
}

#[tokio::test]
async fn missing_verify_field_answers_400_error() {
    let response = app()
        .oneshot(post_json(
            "/api/payment/verify",
            r#"{"razorpay_order_id": "order_ABC"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    // Distinct from a signature mismatch: an error, not {verified:false}.
    assert!(json.get("verified").is_none());
    assert!(json["error"].as_str().unwrap().contains("Invalid request"));
}

#[tokio::test]
async fn receipt_endpoint_answers_message() {
    let body = r#"{
        "formData": {"name": "Asha", "email": "asha@example.com", "phone": "1"},
        "selectedServices": [{"title": "X", "price": 1000}, {"title": "Y", "price": 2000}]
    }"#;

    let response = app()
        .oneshot(post_json("/api/email/receipt", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Email sent");
}

#[tokio::test]
async fn mail_failure_answers_500_generic_error() {
    let h = harness();
    h.mailer
        .fail
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let app = HttpServer::new(h.service).router();

    let body = r#"{
        "formData": {"name": "Asha", "email": "asha@example.com", "phone": "1"},
        "selectedServices": []
    }"#;

    let response = app
        .oneshot(post_json("/api/email/receipt", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Email sending failed");
}

#[tokio::test]
async fn rate_limit_answers_429_when_exceeded() {
    let app = HttpServer::with_rate_limit(harness().service, 3).router();

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(post_json("/api/payment/order", r#"{"amount": 1000}"#))
            .await
            .unwrap();
        assert_ne!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    let response = app
        .clone()
        .oneshot(post_json("/api/payment/order", r#"{"amount": 1000}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Rate limit exceeded"));
    assert_eq!(json["retry_after_seconds"], 60);
}

#[tokio::test]
async fn health_bypasses_rate_limit() {
    let app = HttpServer::with_rate_limit(harness().service, 1).router();

    for _ in 0..10 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
