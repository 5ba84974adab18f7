// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! Handlers and services only see the [`Store`] trait; `main` picks the
//! implementation (Firestore in deployment, in-memory for local runs and tests).

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreStore;
pub use self::memory::MemoryStore;

use crate::error::AppError;
use crate::models::{NewProfile, NewWeightRecord, Profile, WeightRecord};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// Profiles, keyed by the (URL-encoded) identity subject
    pub const PROFILES: &str = "profiles";
    /// Weight records, keyed by record ID
    pub const WEIGHT_RECORDS: &str = "weight_records";
}

/// Persistence operations for profiles and weight records.
///
/// Every call is its own implicit transaction; no lock is held across calls.
#[async_trait]
pub trait Store: Send + Sync {
    /// Look up the profile whose `uid` equals `uid`.
    async fn find_profile_by_uid(&self, uid: &str) -> Result<Option<Profile>, AppError>;

    /// Insert a new profile with a store-generated ID.
    ///
    /// Fails with [`AppError::ConstraintViolation`] if a profile for the same
    /// `uid` already exists.
    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, AppError>;

    /// Overwrite a stored profile.
    ///
    /// Fails with [`AppError::NotFound`] if the profile no longer exists; a
    /// deleted profile is never recreated.
    async fn update_profile(&self, profile: &Profile) -> Result<(), AppError>;

    /// Delete a profile and every weight record it owns.
    ///
    /// The profile goes first, so a concurrent [`Store::insert_weight`]
    /// either lands before the records are removed or is rejected.
    ///
    /// Returns the number of records removed, the profile included.
    async fn delete_profile(&self, profile: &Profile) -> Result<usize, AppError>;

    /// Insert a weight record owned by `owner` with a store-generated ID.
    ///
    /// Fails with [`AppError::NotFound`] if `owner` has been deleted.
    async fn insert_weight(
        &self,
        owner: &Profile,
        record: NewWeightRecord,
    ) -> Result<WeightRecord, AppError>;

    /// List all weight records owned by `owner_id`, in store order.
    async fn list_weights(&self, owner_id: &str) -> Result<Vec<WeightRecord>, AppError>;
}

/// Generate a new record identifier.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
