//! Garden persistence integration tests.
//!
//! Exercises the plant store over the real file-backed storage: every read
//! is a fresh deserialization of the on-disk collection, so records must
//! survive reopening the storage between operations.

use std::sync::Arc;
use tempfile::TempDir;
use verdia::garden::{
    CareDetails, FileStorage, KeyValueStorage, NewPlant, PlantPatch, PlantStatus, PlantStore,
    SAVED_PLANTS_KEY,
};

fn open_store(dir: &TempDir) -> PlantStore {
    let storage = FileStorage::open(dir.path().to_path_buf()).unwrap();
    PlantStore::new(Arc::new(storage) as Arc<dyn KeyValueStorage>)
}

fn new_plant(name: &str, needs_water: bool) -> NewPlant {
    NewPlant {
        name: name.to_string(),
        scientific_name: format!("{name} communis"),
        location: "Salón Principal".to_string(),
        image: "data:image/jpeg;base64,/9j/AAAA".to_string(),
        status: PlantStatus::Healthy,
        is_toxic: false,
        needs_water,
        care_details: CareDetails {
            light: "Indirecta".to_string(),
            water: "Media".to_string(),
            temp: "20°C".to_string(),
            humidity: "Alta".to_string(),
        },
        next_watering: "En 4 días".to_string(),
        diagnosis: None,
    }
}

#[test]
fn saved_plants_survive_reopening_the_storage() {
    let dir = TempDir::new().unwrap();

    let saved = {
        let store = open_store(&dir);
        store.save(&new_plant("Monstera", false)).unwrap()
    };

    // A brand-new handle over the same directory sees the record.
    let store = open_store(&dir);
    let listed = store.list_saved();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], saved);
    assert_eq!(listed[0].plant.care_details.light, "Indirecta");
}

#[test]
fn collection_is_one_json_array_under_the_well_known_key() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    store.save(&new_plant("Ficus", true)).unwrap();

    let path = dir.path().join(format!("{SAVED_PLANTS_KEY}.json"));
    let raw = std::fs::read_to_string(path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let array = value.as_array().expect("collection is a JSON array");
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["name"], "Ficus");
    assert_eq!(array[0]["needsWater"], true);
    assert!(array[0]["scannedAt"].is_string());
}

#[test]
fn order_and_count_hold_across_many_saves() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let mut ids = Vec::new();
    for i in 0..8 {
        ids.push(store.save(&new_plant(&format!("p{i}"), false)).unwrap().plant.id);
    }
    ids.reverse();

    let listed: Vec<String> = store
        .list_saved()
        .into_iter()
        .map(|p| p.plant.id)
        .collect();
    assert_eq!(listed, ids);
    assert_eq!(store.storage_info().count, 8);
}

#[test]
fn delete_then_update_leave_consistent_state() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let a = store.save(&new_plant("A", false)).unwrap();
    let b = store.save(&new_plant("B", false)).unwrap();

    store.delete(&a.plant.id).unwrap();
    assert!(store.find(&a.plant.id).is_none());

    store
        .update(
            &b.plant.id,
            PlantPatch {
                status: Some(PlantStatus::Sick),
                ..Default::default()
            },
        )
        .unwrap();

    let after = store.find(&b.plant.id).unwrap();
    assert_eq!(after.plant.status, PlantStatus::Sick);
    assert!(after.last_updated > b.last_updated);
    assert_eq!(store.storage_info().count, 1);

    // Updating the deleted id is a quiet no-op.
    store
        .update(
            &a.plant.id,
            PlantPatch {
                name: Some("fantasma".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(store.storage_info().count, 1);
}

#[test]
fn corrupted_file_on_disk_degrades_to_empty_garden() {
    let dir = TempDir::new().unwrap();
    {
        let store = open_store(&dir);
        store.save(&new_plant("Monstera", false)).unwrap();
    }

    // Someone truncates the collection file behind our back.
    let path = dir.path().join(format!("{SAVED_PLANTS_KEY}.json"));
    std::fs::write(&path, "[{\"id\": ").unwrap();

    let store = open_store(&dir);
    assert!(store.list_saved().is_empty());
    assert_eq!(store.storage_info().count, 0);

    // Saving again replaces the corrupted payload.
    store.save(&new_plant("Sansevieria", false)).unwrap();
    assert_eq!(store.list_saved().len(), 1);
}
