// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Backs the gear, workout and settings stores with three collections:
//! `gear`, `workouts` and `settings` (one document per settings key).
//! Bulk writes go through Firestore transactions so they are all-or-nothing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{collections, GearStore, SettingsStore, WorkoutStore};
use crate::error::AppError;
use crate::error::Result;
use crate::models::{Gear, Workout};

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

/// One settings key stored as its own document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingEntry {
    value: String,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self> {
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

        Ok(Self { client })
    }

    /// Upsert one document by ID into a collection.
    async fn set_document<T: Serialize + for<'de> Deserialize<'de> + Sync + Send>(
        &self,
        collection: &str,
        doc_id: &str,
        object: &T,
    ) -> Result<()> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collection)
            .document_id(doc_id)
            .object(object)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Upsert a batch of documents in transactional chunks.
    async fn set_documents_atomic<T, F>(
        &self,
        collection: &str,
        items: &[T],
        id_extractor: F,
    ) -> Result<()>
    where
        T: Serialize + for<'de> Deserialize<'de> + Sync + Send,
        F: Fn(&T) -> String,
    {
        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = self
                .client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                self.client
                    .fluent()
                    .update()
                    .in_col(collection)
                    .document_id(&doc_id)
                    .object(item)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add write to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction
                .commit()
                .await
                .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;
        }

        Ok(())
    }
}

// ─── Gear Operations ─────────────────────────────────────────────

#[async_trait]
impl GearStore for FirestoreDb {
    async fn get(&self, id: Uuid) -> Result<Option<Gear>> {
        let gear: Option<Gear> = self
            .client
            .fluent()
            .select()
            .by_id_in(collections::GEAR)
            .obj()
            .one(&id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(gear.filter(|g| !g.is_deleted))
    }

    async fn fetch_all(&self) -> Result<Vec<Gear>> {
        self.client
            .fluent()
            .select()
            .from(collections::GEAR)
            .filter(|q| q.field("is_deleted").eq(false))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn fetch_active(&self) -> Result<Vec<Gear>> {
        self.client
            .fluent()
            .select()
            .from(collections::GEAR)
            .filter(|q| {
                q.for_all([
                    q.field("is_active").eq(true),
                    q.field("is_deleted").eq(false),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn fetch_primary(&self) -> Result<Option<Gear>> {
        let matches: Vec<Gear> = self
            .client
            .fluent()
            .select()
            .from(collections::GEAR)
            .filter(|q| {
                q.for_all([
                    q.field("is_primary").eq(true),
                    q.field("is_deleted").eq(false),
                ])
            })
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(matches.into_iter().next())
    }

    async fn create(&self, gear: &Gear) -> Result<()> {
        self.set_document(collections::GEAR, &gear.id.to_string(), gear)
            .await
    }

    async fn update(&self, gear: &Gear) -> Result<()> {
        let mut gear = gear.clone();
        gear.mark_updated();
        self.set_document(collections::GEAR, &gear.id.to_string(), &gear)
            .await
    }

    async fn update_bulk(&self, gear: &[Gear]) -> Result<()> {
        let updated: Vec<Gear> = gear
            .iter()
            .map(|g| {
                let mut g = g.clone();
                g.mark_updated();
                g
            })
            .collect();

        self.set_documents_atomic(collections::GEAR, &updated, |g| g.id.to_string())
            .await
    }

    async fn delete(&self, gear: &Gear) -> Result<()> {
        let mut gear = gear.clone();
        gear.mark_deleted();
        self.set_document(collections::GEAR, &gear.id.to_string(), &gear)
            .await
    }
}

// ─── Workout Operations ──────────────────────────────────────────

#[async_trait]
impl WorkoutStore for FirestoreDb {
    async fn fetch_all(&self) -> Result<Vec<Workout>> {
        // No is_deleted filter: dedupe needs to see soft-deleted records.
        self.client
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn fetch_recent(&self, limit: u32, offset: u32) -> Result<Vec<Workout>> {
        self.client
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(|q| q.field("is_deleted").eq(false))
            .order_by([(
                "start_date",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .offset(offset)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn create(&self, workout: &Workout) -> Result<()> {
        self.set_document(collections::WORKOUTS, &workout.id.to_string(), workout)
            .await
    }

    async fn create_bulk(&self, workouts: &[Workout]) -> Result<()> {
        self.set_documents_atomic(collections::WORKOUTS, workouts, |w| w.id.to_string())
            .await
    }

    async fn update(&self, workout: &Workout) -> Result<()> {
        let mut workout = workout.clone();
        workout.mark_updated();
        self.set_document(collections::WORKOUTS, &workout.id.to_string(), &workout)
            .await
    }

    async fn delete(&self, workout: &Workout) -> Result<()> {
        let mut workout = workout.clone();
        workout.mark_deleted();
        self.set_document(collections::WORKOUTS, &workout.id.to_string(), &workout)
            .await
    }

    async fn delete_bulk(&self, workouts: &[Workout]) -> Result<()> {
        let deleted: Vec<Workout> = workouts
            .iter()
            .map(|w| {
                let mut w = w.clone();
                w.mark_deleted();
                w
            })
            .collect();

        self.set_documents_atomic(collections::WORKOUTS, &deleted, |w| w.id.to_string())
            .await
    }
}

// ─── Settings Operations ─────────────────────────────────────────

#[async_trait]
impl SettingsStore for FirestoreDb {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry: Option<SettingEntry> = self
            .client
            .fluent()
            .select()
            .by_id_in(collections::SETTINGS)
            .obj()
            .one(key)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(entry.map(|e| e.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let entry = SettingEntry {
            value: value.to_string(),
        };
        self.set_document(collections::SETTINGS, key, &entry).await
    }
}
