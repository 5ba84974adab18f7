// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weight record model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// A single timestamped weight observation owned by a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    /// Store-generated identifier (UUID v4)
    pub id: String,
    /// Owning profile ID
    pub owner_id: String,
    /// Measurement as supplied by the caller (unit is up to the client)
    pub weight: f64,
    /// Server-side time of the write
    pub date: DateTime<Utc>,
}

/// Fields supplied when inserting a weight record. The owner is passed
/// to the store separately.
#[derive(Debug, Clone)]
pub struct NewWeightRecord {
    pub weight: f64,
    pub date: DateTime<Utc>,
}

/// Chart point returned by `GET /weight`.
///
/// `name` carries the record timestamp; charting libraries use `name` as the
/// x-axis label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeightPoint {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub name: DateTime<Utc>,
    pub weight: f64,
}

impl From<WeightRecord> for WeightPoint {
    fn from(record: WeightRecord) -> Self {
        Self {
            name: record.date,
            weight: record.weight,
        }
    }
}

/// Body of `POST /weight`.
#[derive(Debug, Deserialize, Validate)]
pub struct LogWeightRequest {
    #[validate(range(min = 1.0))]
    pub weight: f64,
}
