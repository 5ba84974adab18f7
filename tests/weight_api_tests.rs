// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weight endpoint tests, including the end-to-end profile + weight flow.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use weight_tracker::config::Config;
use weight_tracker::db::{MemoryStore, Store};
use weight_tracker::error::AppError;
use weight_tracker::models::{NewProfile, NewWeightRecord, Profile, WeightRecord};

mod common;

/// Poll `GET /weight` until `count` points are visible; logging is asynchronous.
async fn wait_for_weights(app: &axum::Router, token: &str, count: usize) -> serde_json::Value {
    for _ in 0..50 {
        let (status, body) = common::send(app, "GET", "/weight", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        let weights = common::json(&body);
        if weights.as_array().map(Vec::len) == Some(count) {
            return weights;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {count} weights to be logged");
}

#[tokio::test]
async fn test_profile_and_weight_scenario() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state.config, "auth0|abc");

    let (status, body) = common::send(
        &app,
        "POST",
        "/profile",
        Some(&token),
        Some(json!({ "name": "Alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let profile = common::json(&body);
    assert_eq!(profile["uid"], "auth0|abc");
    assert_eq!(profile["name"], "Alice");

    let (status, body) = common::send(&app, "GET", "/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::json(&body), profile);

    let (status, body) = common::send(
        &app,
        "POST",
        "/weight",
        Some(&token),
        Some(json!({ "weight": 82.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let weights = wait_for_weights(&app, &token, 1).await;
    assert_eq!(weights[0]["weight"], 82.5);
    let timestamp = weights[0]["name"].as_str().expect("timestamp string");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_weights_logged_in_sequence_are_all_listed() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state.config, "auth0|abc");

    common::send(
        &app,
        "POST",
        "/profile",
        Some(&token),
        Some(json!({ "name": "Alice" })),
    )
    .await;

    let logged = [82.5, 82.0, 81.4, 81.9];
    for weight in logged {
        let (status, _) = common::send(
            &app,
            "POST",
            "/weight",
            Some(&token),
            Some(json!({ "weight": weight })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let weights = wait_for_weights(&app, &token, logged.len()).await;
    let mut listed: Vec<f64> = weights
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["weight"].as_f64().unwrap())
        .collect();
    listed.sort_by(f64::total_cmp);

    let mut expected = logged.to_vec();
    expected.sort_by(f64::total_cmp);
    assert_eq!(listed, expected);
}

#[tokio::test]
async fn test_weight_routes_without_profile_are_not_found() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state.config, "auth0|ghost");

    let (status, body) = common::send(
        &app,
        "POST",
        "/weight",
        Some(&token),
        Some(json!({ "weight": 82.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(&body[..], b"Not Found");

    let (status, _) = common::send(&app, "GET", "/weight", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_weight_body_is_rejected_before_profile_lookup() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state.config, "auth0|ghost");

    let (status, _) = common::send(
        &app,
        "POST",
        "/weight",
        Some(&token),
        Some(json!({ "weight": "heavy" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_log_weight_rejects_invalid_body() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state.config, "auth0|abc");

    common::send(
        &app,
        "POST",
        "/profile",
        Some(&token),
        Some(json!({ "name": "Alice" })),
    )
    .await;

    for body in [json!({ "weight": 0 }), json!({ "weight": "heavy" }), json!({})] {
        let (status, _) = common::send(&app, "POST", "/weight", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

/// Store whose weight writes always fail.
struct UnwritableWeights(MemoryStore);

#[async_trait]
impl Store for UnwritableWeights {
    async fn find_profile_by_uid(&self, uid: &str) -> Result<Option<Profile>, AppError> {
        self.0.find_profile_by_uid(uid).await
    }

    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, AppError> {
        self.0.insert_profile(profile).await
    }

    async fn update_profile(&self, profile: &Profile) -> Result<(), AppError> {
        self.0.update_profile(profile).await
    }

    async fn delete_profile(&self, profile: &Profile) -> Result<usize, AppError> {
        self.0.delete_profile(profile).await
    }

    async fn insert_weight(
        &self,
        _owner: &Profile,
        _record: NewWeightRecord,
    ) -> Result<WeightRecord, AppError> {
        Err(AppError::Database("connection refused".to_string()))
    }

    async fn list_weights(&self, owner_id: &str) -> Result<Vec<WeightRecord>, AppError> {
        self.0.list_weights(owner_id).await
    }
}

#[tokio::test]
async fn test_log_weight_succeeds_when_store_write_fails() {
    let (app, state) = common::create_test_app_with(
        Config::test_default(),
        Arc::new(UnwritableWeights(MemoryStore::new())),
    );
    let token = common::create_test_jwt(&state.config, "auth0|abc");

    common::send(
        &app,
        "POST",
        "/profile",
        Some(&token),
        Some(json!({ "name": "Alice" })),
    )
    .await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/weight",
        Some(&token),
        Some(json!({ "weight": 82.5 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    tokio::time::sleep(Duration::from_millis(20)).await;
    let (status, body) = common::send(&app, "GET", "/weight", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::json(&body), json!([]));
}
