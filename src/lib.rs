// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weight-Tracker: authenticated profile and weight-logging API
//!
//! This crate provides the backend for a weight-tracking app: each caller,
//! identified by a verified bearer token, owns one profile and a history of
//! weight measurements.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Store;
use services::{ErrorReporter, ProfileService, TokenVerifier, WeightService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub token_verifier: TokenVerifier,
    pub profile_service: ProfileService,
    pub weight_service: WeightService,
}

impl AppState {
    /// Wire services over an explicitly constructed store.
    pub fn new(
        config: Config,
        store: Arc<dyn Store>,
        token_verifier: TokenVerifier,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            config,
            token_verifier,
            profile_service: ProfileService::new(store.clone()),
            weight_service: WeightService::new(store, reporter),
        }
    }
}
