// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process [`Store`] for local runs and tests.

use crate::db::{new_id, Store};
use crate::error::AppError;
use crate::models::{NewProfile, NewWeightRecord, Profile, WeightRecord};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Store backed by concurrent hash maps. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    /// Profiles keyed by identity subject
    profiles: DashMap<String, Profile>,
    /// Weight records keyed by owner ID, in insertion order
    weights: DashMap<String, Vec<WeightRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_profile_by_uid(&self, uid: &str) -> Result<Option<Profile>, AppError> {
        Ok(self.profiles.get(uid).map(|p| p.value().clone()))
    }

    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, AppError> {
        match self.profiles.entry(profile.uid.clone()) {
            Entry::Occupied(_) => Err(AppError::ConstraintViolation(format!(
                "profile for uid {} already exists",
                profile.uid
            ))),
            Entry::Vacant(slot) => {
                let profile = Profile {
                    id: new_id(),
                    uid: profile.uid,
                    name: profile.name,
                };
                slot.insert(profile.clone());
                Ok(profile)
            }
        }
    }

    async fn update_profile(&self, profile: &Profile) -> Result<(), AppError> {
        match self.profiles.get_mut(&profile.uid) {
            Some(mut stored) if stored.id == profile.id => {
                *stored = profile.clone();
                Ok(())
            }
            _ => Err(AppError::NotFound),
        }
    }

    async fn delete_profile(&self, profile: &Profile) -> Result<usize, AppError> {
        let profiles = usize::from(
            self.profiles
                .remove_if(&profile.uid, |_, stored| stored.id == profile.id)
                .is_some(),
        );
        let weights = self
            .weights
            .remove(&profile.id)
            .map(|(_, records)| records.len())
            .unwrap_or(0);
        Ok(weights + profiles)
    }

    async fn insert_weight(
        &self,
        owner: &Profile,
        record: NewWeightRecord,
    ) -> Result<WeightRecord, AppError> {
        // Holding the profile entry blocks a concurrent delete until the
        // record is in place.
        let Some(_owner) = self
            .profiles
            .get(&owner.uid)
            .filter(|stored| stored.id == owner.id)
        else {
            return Err(AppError::NotFound);
        };

        let record = WeightRecord {
            id: new_id(),
            owner_id: owner.id.clone(),
            weight: record.weight,
            date: record.date,
        };
        self.weights
            .entry(owner.id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn list_weights(&self, owner_id: &str) -> Result<Vec<WeightRecord>, AppError> {
        Ok(self
            .weights
            .get(owner_id)
            .map(|records| records.value().clone())
            .unwrap_or_default())
    }
}
