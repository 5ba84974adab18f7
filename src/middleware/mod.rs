// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (authentication, error rendering, security headers).

pub mod auth;
pub mod errors;
pub mod security;

pub use auth::require_auth;
pub use errors::render_error_details;
