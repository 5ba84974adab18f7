// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Per-user profile, keyed by the identity subject of the caller's token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Profile {
    /// Store-generated identifier (UUID v4)
    pub id: String,
    /// Identity subject from the verified token (unique, immutable)
    pub uid: String,
    /// Display name
    pub name: String,
}

/// Fields supplied when inserting a profile; `id` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub uid: String,
    pub name: String,
}

/// Body of `POST /profile` and `PATCH /profile`.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
