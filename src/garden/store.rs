//! Persisted plant collection — CRUD over a single storage key.
//!
//! The whole garden lives under one key as a JSON array in
//! most-recently-saved-first order. Every call re-reads and re-writes the
//! full collection (read-modify-write, last writer wins); that matches the
//! single-device, single-client usage this store is built for.

use crate::garden::models::{NewPlant, Plant, PlantPatch, SavedPlant};
use crate::garden::storage::{KeyValueStorage, StorageError};
use chrono::{Duration, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Well-known storage key of the plant collection.
pub const SAVED_PLANTS_KEY: &str = "saved_plants";

/// Errors produced by the plant store.
///
/// Read-side problems never surface here: an absent or unparseable
/// collection degrades to empty so the gallery always renders.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing medium rejected the write. The caller still holds the
    /// input fields; nothing was persisted.
    #[error("storage write failed: {0}")]
    Write(#[source] StorageError),

    /// The collection could not be serialized.
    #[error("could not serialize plant collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Record count and serialized-size report for the garden.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    /// Number of saved plants.
    pub count: usize,
    /// Human-readable size of the serialized collection ("0.02 MB").
    pub estimated_size: String,
}

/// CRUD store for [`SavedPlant`] records.
pub struct PlantStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl PlantStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// The full collection, most recently saved first.
    ///
    /// An absent key or a malformed payload is logged and treated as an
    /// empty garden, never as an error.
    pub fn list_saved(&self) -> Vec<SavedPlant> {
        let raw = match self.storage.get(SAVED_PLANTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("could not read plant collection, treating as empty: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(plants) => plants,
            Err(e) => {
                warn!("stored plant collection is unparseable, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Find a saved plant by id.
    pub fn find(&self, id: &str) -> Option<SavedPlant> {
        self.list_saved().into_iter().find(|p| p.plant.id == id)
    }

    /// Persist a new plant: assigns a fresh id and both timestamps, prepends
    /// to the collection, and returns the created record.
    ///
    /// Takes the fields by reference: on a write failure the caller still
    /// holds them, untouched, for a retry.
    pub fn save(&self, new: &NewPlant) -> Result<SavedPlant, StoreError> {
        let mut plants = self.list_saved();
        let now = Utc::now();
        let id = fresh_id(&plants, now.timestamp_millis());

        let record = SavedPlant {
            plant: Plant {
                id,
                name: new.name.clone(),
                scientific_name: new.scientific_name.clone(),
                location: new.location.clone(),
                image: new.image.clone(),
                status: new.status,
                is_toxic: new.is_toxic,
                needs_water: new.needs_water,
                care_details: new.care_details.clone(),
                next_watering: new.next_watering.clone(),
            },
            scanned_at: now,
            last_updated: now,
            diagnosis: new.diagnosis.clone(),
        };

        plants.insert(0, record.clone());
        self.persist(&plants)?;
        Ok(record)
    }

    /// Remove the matching record. Absence of a match is a no-op.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut plants = self.list_saved();
        let before = plants.len();
        plants.retain(|p| p.plant.id != id);
        if plants.len() == before {
            return Ok(());
        }
        self.persist(&plants)
    }

    /// Merge the given fields into the matching record and force-refresh
    /// `last_updated`. An unknown id is a no-op.
    pub fn update(&self, id: &str, patch: PlantPatch) -> Result<(), StoreError> {
        let mut plants = self.list_saved();
        let Some(record) = plants.iter_mut().find(|p| p.plant.id == id) else {
            return Ok(());
        };

        if let Some(name) = patch.name {
            record.plant.name = name;
        }
        if let Some(location) = patch.location {
            record.plant.location = location;
        }
        if let Some(status) = patch.status {
            record.plant.status = status;
        }
        if let Some(needs_water) = patch.needs_water {
            record.plant.needs_water = needs_water;
        }
        if let Some(next_watering) = patch.next_watering {
            record.plant.next_watering = next_watering;
        }
        if let Some(diagnosis) = patch.diagnosis {
            record.diagnosis = Some(diagnosis);
        }

        // `last_updated` must strictly advance even if two updates land in
        // the same clock instant.
        let mut now = Utc::now();
        if now <= record.last_updated {
            now = record.last_updated + Duration::milliseconds(1);
        }
        record.last_updated = now;

        self.persist(&plants)
    }

    /// Record count and serialized-size estimate. Never fails.
    pub fn storage_info(&self) -> StorageInfo {
        let count = self.list_saved().len();
        let bytes = self.storage.size_of(SAVED_PLANTS_KEY);
        StorageInfo {
            count,
            estimated_size: format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0)),
        }
    }

    fn persist(&self, plants: &[SavedPlant]) -> Result<(), StoreError> {
        let data = serde_json::to_string(plants)?;
        self.storage
            .set(SAVED_PLANTS_KEY, &data)
            .map_err(StoreError::Write)
    }
}

/// Time-based identifier, unique within the collection.
///
/// Collisions within one millisecond get a numeric suffix so ids stay
/// time-ordered.
fn fresh_id(plants: &[SavedPlant], millis: i64) -> String {
    let base = format!("plant_{millis}");
    if !plants.iter().any(|p| p.plant.id == base) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{base}_{n}");
        if !plants.iter().any(|p| p.plant.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}
