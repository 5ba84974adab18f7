// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile lookup and find-or-create.

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::{NewProfile, Profile};
use crate::services::oidc::Identity;
use std::sync::Arc;

/// Insert attempts before giving up on a contended profile creation.
const MAX_CREATE_ATTEMPTS: usize = 3;

/// Resolves caller identities to profiles.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn Store>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Look up the caller's profile. `None` is not an error.
    pub async fn get_profile(&self, identity: &Identity) -> Result<Option<Profile>> {
        self.store.find_profile_by_uid(&identity.subject).await
    }

    /// Look up the caller's profile, failing with [`AppError::NotFound`] if absent.
    pub async fn require_profile(&self, identity: &Identity) -> Result<Profile> {
        self.get_profile(identity).await?.ok_or(AppError::NotFound)
    }

    /// Return the caller's profile, creating it with `name` if none exists.
    ///
    /// An existing profile is returned unchanged; `name` is ignored on that path.
    /// If a concurrent request inserts the same subject first, the store's
    /// uniqueness check fails and the winner's profile is re-fetched.
    pub async fn create_profile(&self, identity: &Identity, name: &str) -> Result<Profile> {
        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            if let Some(existing) = self.get_profile(identity).await? {
                return Ok(existing);
            }

            let new_profile = NewProfile {
                uid: identity.subject.clone(),
                name: name.to_string(),
            };

            match self.store.insert_profile(new_profile).await {
                Ok(profile) => {
                    tracing::info!(
                        profile_id = %profile.id,
                        subject = %identity.subject,
                        "Created profile"
                    );
                    return Ok(profile);
                }
                Err(AppError::ConstraintViolation(reason)) => {
                    tracing::debug!(
                        subject = %identity.subject,
                        attempt,
                        reason = %reason,
                        "Profile created concurrently; re-fetching"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::ConstraintViolation(format!(
            "profile for uid {} kept conflicting after {} attempts",
            identity.subject, MAX_CREATE_ATTEMPTS
        )))
    }

    /// Rename the caller's profile.
    pub async fn update_profile(&self, identity: &Identity, name: &str) -> Result<Profile> {
        let mut profile = self.require_profile(identity).await?;
        profile.name = name.to_string();
        self.store.update_profile(&profile).await?;
        Ok(profile)
    }

    /// Delete the caller's profile together with its weight records.
    pub async fn delete_profile(&self, identity: &Identity) -> Result<usize> {
        let profile = self.require_profile(identity).await?;
        let deleted = self.store.delete_profile(&profile).await?;

        tracing::info!(
            profile_id = %profile.id,
            subject = %identity.subject,
            deleted,
            "Deleted profile"
        );

        Ok(deleted)
    }
}
