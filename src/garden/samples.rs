//! Built-in sample plants, shown while the garden is still empty.

use crate::garden::models::{CareDetails, Plant, PlantStatus};

/// The three display plants. The Sansevieria deliberately carries
/// `status = warning` together with `needs_water = true`; the two fields are
/// independent.
pub fn sample_plants() -> Vec<Plant> {
    vec![
        Plant {
            id: "1".to_string(),
            name: "Monstera Deliciosa".to_string(),
            scientific_name: "Monstera deliciosa".to_string(),
            location: "Salón Principal".to_string(),
            image: "https://picsum.photos/seed/monstera/400/300".to_string(),
            status: PlantStatus::Healthy,
            is_toxic: true,
            needs_water: false,
            care_details: CareDetails {
                light: "Indirecta".to_string(),
                water: "Media".to_string(),
                temp: "20°C".to_string(),
                humidity: "Alta".to_string(),
            },
            next_watering: "En 4 días".to_string(),
        },
        Plant {
            id: "2".to_string(),
            name: "Sansevieria".to_string(),
            scientific_name: "Dracaena trifasciata".to_string(),
            location: "Dormitorio".to_string(),
            image: "https://picsum.photos/seed/sansevieria/400/300".to_string(),
            status: PlantStatus::Warning,
            is_toxic: false,
            needs_water: true,
            care_details: CareDetails {
                light: "Baja luz".to_string(),
                water: "Baja".to_string(),
                temp: "15-30°C".to_string(),
                humidity: "Baja".to_string(),
            },
            next_watering: "Riego hoy".to_string(),
        },
        Plant {
            id: "3".to_string(),
            name: "Ficus Lyrata".to_string(),
            scientific_name: "Ficus lyrata".to_string(),
            location: "Oficina".to_string(),
            image: "https://picsum.photos/seed/ficus/400/300".to_string(),
            status: PlantStatus::Healthy,
            is_toxic: true,
            needs_water: false,
            care_details: CareDetails {
                light: "Mucha luz".to_string(),
                water: "Cada 7 días".to_string(),
                temp: "18-24°C".to_string(),
                humidity: "Media".to_string(),
            },
            next_watering: "En 6 días".to_string(),
        },
    ]
}
