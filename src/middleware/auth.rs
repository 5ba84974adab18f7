// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token authentication middleware.

use crate::error::AppError;
use crate::services::{Identity, VerifyError};
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, Extensions},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires a valid bearer token and attaches the caller's
/// [`Identity`] to the request.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request.headers().get(header::AUTHORIZATION);

    let identity = state
        .token_verifier
        .verify(auth_header)
        .await
        .map_err(|err| match err {
            VerifyError::Unauthorized(reason) => {
                tracing::debug!(reason = %reason, "Rejected bearer token");
                if auth_header.is_none() {
                    AppError::Unauthorized
                } else {
                    AppError::InvalidToken
                }
            }
            VerifyError::Transient(reason) => AppError::AuthProvider(reason),
        })?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Read the identity attached by [`require_auth`].
pub fn resolve_identity(extensions: &Extensions) -> Result<Identity, AppError> {
    extensions
        .get::<Identity>()
        .cloned()
        .ok_or(AppError::MissingClaim)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolve_identity(&parts.extensions)
    }
}
