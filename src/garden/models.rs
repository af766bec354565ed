//! Domain model structs persisted in the local garden.
//!
//! Field names on disk keep the original camelCase identifiers
//! (`scientificName`, `scannedAt`, `lastUpdated`, …) so an existing garden
//! file remains readable across versions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health status of a plant as shown in the gallery.
///
/// Independent of [`Plant::needs_water`]: a plant may be `healthy` and still
/// thirsty, or `sick` and recently watered. The two fields are set
/// separately and no consistency between them is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantStatus {
    Healthy,
    Warning,
    Sick,
}

impl PlantStatus {
    /// Spanish gallery label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "Saludable",
            Self::Warning => "Atención",
            Self::Sick => "Enferma",
        }
    }
}

/// Care requirements, as free-text semantic labels ("Indirecta", "Cada 7
/// días", "18-24°C"), not structured units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareDetails {
    /// Light level.
    pub light: String,
    /// Watering frequency.
    pub water: String,
    /// Temperature range.
    pub temp: String,
    /// Ambient humidity level.
    pub humidity: String,
}

impl CareDetails {
    /// Placeholder details for a plant saved straight from a diagnosis,
    /// before the user fills them in.
    pub fn unknown() -> Self {
        Self {
            light: "Sin datos".to_string(),
            water: "Sin datos".to_string(),
            temp: "Sin datos".to_string(),
            humidity: "Sin datos".to_string(),
        }
    }
}

/// A plant as displayed in the gallery and detail views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    /// Opaque unique identifier.
    pub id: String,
    /// Common name shown as the card title.
    pub name: String,
    /// Scientific (binomial) name.
    pub scientific_name: String,
    /// Location label ("Salón Principal", "Dormitorio", …).
    pub location: String,
    /// Image reference: a URL or an embedded data URI.
    pub image: String,
    /// Health status badge.
    pub status: PlantStatus,
    /// Whether the plant is toxic to pets.
    pub is_toxic: bool,
    /// Whether the plant needs water right now.
    pub needs_water: bool,
    /// Care requirements.
    pub care_details: CareDetails,
    /// Human-readable next-watering label ("En 4 días", "Riego hoy").
    pub next_watering: String,
}

/// Diagnosis snapshot attached to a saved plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisSnapshot {
    /// Overall health label.
    pub health: String,
    /// Problems detected at scan time.
    pub problems: Vec<String>,
    /// Recommended actions.
    pub recommendations: Vec<String>,
}

/// A plant persisted by the user, with provenance timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlant {
    #[serde(flatten)]
    pub plant: Plant,
    /// When the record was created.
    pub scanned_at: DateTime<Utc>,
    /// When the record was last modified. Refreshed on every update.
    pub last_updated: DateTime<Utc>,
    /// Diagnosis snapshot from the scan that produced this record, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<DiagnosisSnapshot>,
}

/// Input to [`crate::garden::PlantStore::save`]: every `Plant` field except
/// the identifier and timestamps, which the store assigns.
#[derive(Debug, Clone)]
pub struct NewPlant {
    pub name: String,
    pub scientific_name: String,
    pub location: String,
    pub image: String,
    pub status: PlantStatus,
    pub is_toxic: bool,
    pub needs_water: bool,
    pub care_details: CareDetails,
    pub next_watering: String,
    pub diagnosis: Option<DiagnosisSnapshot>,
}

/// Partial update for [`crate::garden::PlantStore::update`]. `None` fields
/// are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PlantPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub status: Option<PlantStatus>,
    pub needs_water: Option<bool>,
    pub next_watering: Option<String>,
    pub diagnosis: Option<DiagnosisSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_plant_wire_format() {
        let plant = SavedPlant {
            plant: Plant {
                id: "plant_1".to_string(),
                name: "Monstera".to_string(),
                scientific_name: "Monstera deliciosa".to_string(),
                location: "Salón".to_string(),
                image: "data:image/jpeg;base64,AAAA".to_string(),
                status: PlantStatus::Healthy,
                is_toxic: true,
                needs_water: false,
                care_details: CareDetails::unknown(),
                next_watering: "En 4 días".to_string(),
            },
            scanned_at: Utc::now(),
            last_updated: Utc::now(),
            diagnosis: None,
        };

        let json = serde_json::to_value(&plant).unwrap();
        // The flattened record keeps the original field names.
        assert!(json.get("scientificName").is_some());
        assert!(json.get("isToxic").is_some());
        assert!(json.get("needsWater").is_some());
        assert!(json.get("scannedAt").is_some());
        assert!(json.get("lastUpdated").is_some());
        assert_eq!(json["status"], "healthy");
        // Absent diagnosis is omitted, not null.
        assert!(json.get("diagnosis").is_none());
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [PlantStatus::Healthy, PlantStatus::Warning, PlantStatus::Sick] {
            let s = serde_json::to_string(&status).unwrap();
            let back: PlantStatus = serde_json::from_str(&s).unwrap();
            assert_eq!(back, status);
        }
    }
}
