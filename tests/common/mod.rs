// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use weight_tracker::config::Config;
use weight_tracker::db::{MemoryStore, Store};
use weight_tracker::routes::create_router;
use weight_tracker::services::{TokenVerifier, TracingReporter};
use weight_tracker::AppState;

pub const TEST_KID: &str = "test-key";
const PRIVATE_KEY: &[u8] = include_bytes!("../fixtures/test_rsa_private.pem");
const PUBLIC_KEY: &[u8] = include_bytes!("../fixtures/test_rsa_public.pem");

/// Create a test app over an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(), Arc::new(MemoryStore::new()))
}

/// Create a test app with a custom config and store.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config, store: Arc<dyn Store>) -> (axum::Router, Arc<AppState>) {
    let decoding_key = DecodingKey::from_rsa_pem(PUBLIC_KEY).expect("valid test public key");
    let token_verifier = TokenVerifier::new_with_static_key(&config, TEST_KID, decoding_key)
        .expect("static verifier");

    let state = Arc::new(AppState::new(
        config,
        store,
        token_verifier,
        Arc::new(TracingReporter),
    ));

    (create_router(state.clone()), state)
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    aud: &'a str,
    sub: &'a str,
    iat: u64,
    exp: u64,
}

/// Create an RS256 access token for `subject`, as the identity provider would.
#[allow(dead_code)]
pub fn create_test_jwt(config: &Config, subject: &str) -> String {
    sign_token(&config.auth_issuer, &config.auth_audience, subject, 3600)
}

/// Sign a token with arbitrary issuer/audience; `ttl_secs` may be negative.
#[allow(dead_code)]
pub fn sign_token(issuer: &str, audience: &str, subject: &str, ttl_secs: i64) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let claims = Claims {
        iss: issuer,
        aud: audience,
        sub: subject,
        iat: now,
        exp: now.saturating_add_signed(ttl_secs),
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(TEST_KID.to_string());

    encode(
        &header,
        &claims,
        &EncodingKey::from_rsa_pem(PRIVATE_KEY).expect("valid test private key"),
    )
    .expect("Failed to create JWT")
}

/// Send a request through the router and collect the response body.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, Bytes) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes)
}

/// Parse a response body as JSON.
#[allow(dead_code)]
pub fn json(bytes: &Bytes) -> serde_json::Value {
    serde_json::from_slice(bytes).expect("response body should be JSON")
}
