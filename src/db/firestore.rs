// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-backed [`Store`].
//!
//! Collections:
//! - `profiles` (document ID = URL-encoded identity subject)
//! - `weight_records` (document ID = record ID, filtered by `owner_id`)

use crate::db::{collections, new_id, Store};
use crate::error::AppError;
use crate::models::{NewProfile, NewWeightRecord, Profile, WeightRecord};
use async_trait::async_trait;
use firestore::errors::FirestoreError;
use firestore::{FirestoreConsistencySelector, FirestoreWritePrecondition};

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreStore {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Delete weight records in transactional chunks.
    async fn batch_delete_weights(&self, records: &[WeightRecord]) -> Result<(), AppError> {
        let client = self.get_client()?;

        for chunk in records.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for record in chunk {
                client
                    .fluent()
                    .delete()
                    .from(collections::WEIGHT_RECORDS)
                    .document_id(&record.id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add weight record deletion to transaction: {}",
                            e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }
}

/// Firestore document IDs may not contain `/`; identity subjects might.
fn profile_doc_id(uid: &str) -> String {
    urlencoding::encode(uid).into_owned()
}

#[async_trait]
impl Store for FirestoreStore {
    async fn find_profile_by_uid(&self, uid: &str) -> Result<Option<Profile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(&profile_doc_id(uid))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, AppError> {
        let profile = Profile {
            id: new_id(),
            uid: profile.uid,
            name: profile.name,
        };

        // `insert` is a create-document call, so a second profile for the
        // same subject is rejected by Firestore itself.
        self.get_client()?
            .fluent()
            .insert()
            .into(collections::PROFILES)
            .document_id(profile_doc_id(&profile.uid))
            .object(&profile)
            .execute()
            .await
            .map_err(|e| match e {
                FirestoreError::DataConflictError(_) => AppError::ConstraintViolation(format!(
                    "profile for uid {} already exists",
                    profile.uid
                )),
                other => AppError::Database(other.to_string()),
            })
    }

    async fn update_profile(&self, profile: &Profile) -> Result<(), AppError> {
        let _: Profile = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PROFILES)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(profile_doc_id(&profile.uid))
            .object(profile)
            .execute()
            .await
            .map_err(|e| match e {
                FirestoreError::DataNotFoundError(_) => AppError::NotFound,
                other => AppError::Database(other.to_string()),
            })?;
        Ok(())
    }

    async fn delete_profile(&self, profile: &Profile) -> Result<usize, AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::PROFILES)
            .document_id(profile_doc_id(&profile.uid))
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Weight inserts read the profile inside their transaction, so none
        // can commit for this owner once the profile is gone.
        let records = self.list_weights(&profile.id).await?;
        let count = records.len();

        self.batch_delete_weights(&records).await?;
        tracing::debug!(profile_id = %profile.id, count, "Deleted weight records");

        Ok(count + 1)
    }

    async fn insert_weight(
        &self,
        owner: &Profile,
        record: NewWeightRecord,
    ) -> Result<WeightRecord, AppError> {
        let client = self.get_client()?;
        let record = WeightRecord {
            id: new_id(),
            owner_id: owner.id.clone(),
            weight: record.weight,
            date: record.date,
        };

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;
        let tx_client = client.clone_with_consistency_selector(
            FirestoreConsistencySelector::Transaction(transaction.transaction_id().clone()),
        );

        let stored: Option<Profile> = tx_client
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(&profile_doc_id(&owner.uid))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !matches!(stored, Some(ref stored) if stored.id == owner.id) {
            transaction
                .rollback()
                .await
                .map_err(|e| AppError::Database(format!("Failed to roll back: {}", e)))?;
            return Err(AppError::NotFound);
        }

        client
            .fluent()
            .update()
            .in_col(collections::WEIGHT_RECORDS)
            .precondition(FirestoreWritePrecondition::Exists(false))
            .document_id(&record.id)
            .object(&record)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add weight record to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit weight record: {}", e)))?;

        Ok(record)
    }

    async fn list_weights(&self, owner_id: &str) -> Result<Vec<WeightRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::WEIGHT_RECORDS)
            .filter(|q| q.for_all([q.field("owner_id").eq(owner_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
