//! Local garden — persisted plant records over a key-value storage layer.

pub mod models;
pub mod samples;
pub mod storage;
pub mod store;

pub use models::{
    CareDetails, DiagnosisSnapshot, NewPlant, Plant, PlantPatch, PlantStatus, SavedPlant,
};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{PlantStore, StorageInfo, StoreError, SAVED_PLANTS_KEY};
