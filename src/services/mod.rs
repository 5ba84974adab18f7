// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod oidc;
pub mod profile;
pub mod reporter;
pub mod weight;

pub use oidc::{Identity, TokenVerifier, VerifyError};
pub use profile::ProfileService;
pub use reporter::{ErrorReporter, TracingReporter};
pub use weight::WeightService;
