// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error body rendering middleware.
//!
//! [`AppError`](crate::error::AppError) responses always carry a redacted
//! `stack`. Outside production this layer swaps in the full error chain.

use crate::error::ErrorReport;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Expose error chains in development responses.
pub async fn render_error_details(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    if state.config.is_production() {
        return response;
    }

    let Some(ErrorReport(report)) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    let (_, body) = Json(report).into_response().into_parts();

    Response::from_parts(parts, body)
}
