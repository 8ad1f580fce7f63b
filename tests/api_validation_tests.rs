// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request-level behavior of the HTTP surface.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{check_payload, create_test_app, json_request, request, send, TOKEN};

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let (app, _) = create_test_app();

    let (status, _) = send(&app, request("PATCH", "/check", TOKEN)).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_invalid_json_body_is_bad_request() {
    let (app, store) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/check")
                .header("token", TOKEN)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.count("checks"), 0);
}

#[tokio::test]
async fn test_create_without_token_header_is_forbidden() {
    let (app, store) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/check")
                .body(Body::from(check_payload().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(store.count("checks"), 0);
}

#[tokio::test]
async fn test_each_missing_create_field_is_bad_request() {
    let (app, _) = create_test_app();

    for field in ["protocol", "url", "method", "successCodes", "timeoutSeconds"] {
        let mut payload = check_payload();
        payload.as_object_mut().unwrap().remove(field);

        let (status, body) = send(&app, json_request("POST", "/check", TOKEN, payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
        assert_eq!(body["error"], "invalid_request");
    }
}

#[tokio::test]
async fn test_timeout_out_of_range_is_bad_request() {
    let (app, _) = create_test_app();

    let mut payload = check_payload();
    payload["timeoutSeconds"] = json!(6);

    let (status, _) = send(&app, json_request("POST", "/check", TOKEN, payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_offline_store_yields_server_error() {
    let store = Arc::new(common::test_db_offline());
    let (app, _) = common::create_test_app_with(store, 5, None);

    let (status, body) = send(
        &app,
        request("GET", "/check?id=abcdefghij0123456789", TOKEN),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database_error");
}

#[tokio::test]
async fn test_health_and_security_headers() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
}

#[tokio::test]
async fn test_cors_preflight_allows_token_header() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/check")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    let allowed = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(allowed.contains("token"));
}
