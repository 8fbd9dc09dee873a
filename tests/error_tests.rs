// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use acogo_fitness::db::StoreError;
use acogo_fitness::error::AppError;
use axum::http::StatusCode;
use axum::response::IntoResponse;

async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_client_errors_map_to_4xx() {
    let (status, body) = body_json(AppError::Validation("userId is required".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"], "userId is required");

    let (status, body) = body_json(AppError::Domain("Users are already connected.".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "rejected");

    let (status, _) = body_json(AppError::NotFound("Friend request not found.".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_errors_hide_details() {
    let err = AppError::from(StoreError::Backend("disk quota exceeded".into()));
    assert!(!err.is_client_error());

    let (status, body) = body_json(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "store_error");
    assert!(body.get("details").is_none());
}

#[test]
fn test_store_error_display_is_transparent() {
    let err = AppError::from(StoreError::Unavailable("timeout".into()));
    assert_eq!(err.to_string(), "Store unavailable: timeout");
}
