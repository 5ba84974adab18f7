// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weight logging and charting.

use crate::db::Store;
use crate::error::Result;
use crate::models::{NewWeightRecord, Profile, WeightPoint};
use crate::services::reporter::ErrorReporter;
use std::sync::Arc;
use tokio::task::JoinHandle;

const LOG_WEIGHT_TASK: &str = "log_weight";

/// Appends and lists weight records for a profile.
#[derive(Clone)]
pub struct WeightService {
    store: Arc<dyn Store>,
    reporter: Arc<dyn ErrorReporter>,
}

impl WeightService {
    pub fn new(store: Arc<dyn Store>, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { store, reporter }
    }

    /// Record `weight` for `profile` in the background.
    ///
    /// The write is at-most-once: a store failure goes to the injected
    /// [`ErrorReporter`] and is never returned to the caller. If the profile
    /// is deleted before the task runs, the store rejects the write and that
    /// is reported the same way. The handle only signals completion.
    pub fn log_weight(&self, profile: &Profile, weight: f64) -> JoinHandle<()> {
        let store = self.store.clone();
        let reporter = self.reporter.clone();
        let owner = profile.clone();

        tokio::spawn(async move {
            let record = NewWeightRecord {
                weight,
                date: chrono::Utc::now(),
            };

            match store.insert_weight(&owner, record).await {
                Ok(record) => {
                    tracing::debug!(
                        profile_id = %record.owner_id,
                        record_id = %record.id,
                        weight = record.weight,
                        "Logged weight"
                    );
                }
                Err(err) => reporter.report(LOG_WEIGHT_TASK, &err),
            }
        })
    }

    /// All weights for `profile` as chart points, in store order.
    pub async fn get_weights(&self, profile: &Profile) -> Result<Vec<WeightPoint>> {
        let records = self.store.list_weights(&profile.id).await?;
        Ok(records.into_iter().map(WeightPoint::from).collect())
    }
}
