//! `verdia garden` — gallery, detail, edit, remove, and storage info.

use crate::cli::output::{self, Styled};
use crate::garden::samples::sample_plants;
use crate::garden::{Plant, PlantPatch, PlantStatus, PlantStore};
use anyhow::{bail, Result};

/// Parse a status flag value.
pub fn parse_status(raw: &str) -> Result<PlantStatus> {
    match raw.to_ascii_lowercase().as_str() {
        "healthy" => Ok(PlantStatus::Healthy),
        "warning" => Ok(PlantStatus::Warning),
        "sick" => Ok(PlantStatus::Sick),
        other => bail!("estado desconocido '{other}' (usa: healthy, warning, sick)"),
    }
}

/// Optional edit fields for `garden edit`.
#[derive(Debug, Default)]
pub struct EditFields {
    pub name: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub needs_water: Option<bool>,
    pub next_watering: Option<String>,
    /// Shorthand: mark as freshly watered.
    pub watered: bool,
}

/// Render the gallery.
pub async fn run_list(
    needs_water: bool,
    location: Option<&str>,
    species: Option<&str>,
) -> Result<()> {
    let store = PlantStore::new(crate::cli::open_storage()?);
    let saved = store.list_saved();

    if output::is_json() {
        output::print_json(&serde_json::to_value(&saved)?);
        return Ok(());
    }

    let s = Styled::new();
    let (plants, from_samples): (Vec<Plant>, bool) = if saved.is_empty() {
        (sample_plants(), true)
    } else {
        (saved.iter().map(|p| p.plant.clone()).collect(), false)
    };

    let filtered: Vec<&Plant> = plants
        .iter()
        .filter(|p| !needs_water || p.needs_water)
        .filter(|p| {
            location.map_or(true, |l| p.location.to_lowercase().contains(&l.to_lowercase()))
        })
        .filter(|p| {
            species.map_or(true, |q| {
                let q = q.to_lowercase();
                p.name.to_lowercase().contains(&q)
                    || p.scientific_name.to_lowercase().contains(&q)
            })
        })
        .collect();

    let thirsty = plants.iter().filter(|p| p.needs_water).count();
    println!();
    println!("  {}", s.bold("Mi Jardín"));
    println!("  {} plantas necesitan agua", thirsty);
    if from_samples {
        println!(
            "  {}",
            s.dim("Aún no has guardado plantas — mostrando jardín de ejemplo.")
        );
    }
    println!();

    if filtered.is_empty() {
        println!("  No hay plantas que coincidan con el filtro.");
        return Ok(());
    }

    for plant in filtered {
        print_card(&s, plant);
    }

    if !output::is_quiet() {
        println!(
            "  {}",
            s.dim("Escanea una planta nueva con 'verdia scan <imagen>'.")
        );
    }
    Ok(())
}

fn print_card(s: &Styled, plant: &Plant) {
    let badge = if plant.needs_water {
        s.warn_sym() + " Sedienta"
    } else {
        format!("{} {}", s.ok_sym(), plant.status.label())
    };
    let toxicity = if plant.is_toxic { "Tóxica" } else { "Segura" };

    println!(
        "  {}  {}",
        s.bold(&plant.name),
        s.dim(&format!("({})", plant.scientific_name))
    );
    println!(
        "    {}  ·  {}  ·  {}  ·  id: {}",
        badge, plant.location, toxicity, plant.id
    );
    println!(
        "    Riego: {}  ·  Luz: {}  ·  Agua: {}  ·  Temp: {}  ·  Humedad: {}",
        plant.next_watering,
        plant.care_details.light,
        plant.care_details.water,
        plant.care_details.temp,
        plant.care_details.humidity
    );
    println!();
}

/// Render the detail view for one plant.
///
/// Saved records take precedence over the built-in samples, mirroring the
/// gallery's lookup order.
pub async fn run_show(id: &str) -> Result<()> {
    let store = PlantStore::new(crate::cli::open_storage()?);
    let s = Styled::new();

    if let Some(record) = store.find(id) {
        if output::is_json() {
            output::print_json(&serde_json::to_value(&record)?);
            return Ok(());
        }
        print_detail(&s, &record.plant);
        println!(
            "    Guardada: {}  ·  Actualizada: {}",
            record.scanned_at.format("%Y-%m-%d %H:%M"),
            record.last_updated.format("%Y-%m-%d %H:%M")
        );
        println!();
        match &record.diagnosis {
            Some(diag) => {
                println!("  {}", s.bold("Último diagnóstico"));
                println!("    Estado: {}", diag.health);
                for problem in &diag.problems {
                    println!("    Problema: {problem}");
                }
                for rec in &diag.recommendations {
                    println!("    Recomendación: {rec}");
                }
            }
            None => println!("  Diagnóstico: Información no disponible"),
        }
        println!();
        return Ok(());
    }

    if let Some(plant) = sample_plants().into_iter().find(|p| p.id == id) {
        if output::is_json() {
            output::print_json(&serde_json::to_value(&plant)?);
            return Ok(());
        }
        print_detail(&s, &plant);
        println!("  Diagnóstico: Información no disponible");
        println!();
        return Ok(());
    }

    println!("  Planta no encontrada");
    std::process::exit(1);
}

fn print_detail(s: &Styled, plant: &Plant) {
    println!();
    println!("  {}", s.bold(&plant.name));
    println!("  {}  ·  {}", plant.scientific_name, plant.location);
    println!();
    println!("    Agua:        {}", plant.next_watering);
    println!("    Temperatura: {}", plant.care_details.temp);
    println!("    Luz:         {}", plant.care_details.light);
    println!("    Humedad:     {}", plant.care_details.humidity);
    println!(
        "    Estado:      {}{}",
        plant.status.label(),
        if plant.needs_water { " · necesita agua" } else { "" }
    );
    println!(
        "    Mascotas:    {}",
        if plant.is_toxic { "Tóxica" } else { "Segura" }
    );
}

/// Remove a plant. Removing an unknown id is a no-op, reported as such.
pub async fn run_remove(id: &str) -> Result<()> {
    let store = PlantStore::new(crate::cli::open_storage()?);
    let existed = store.find(id).is_some();
    store.delete(id)?;

    if output::is_json() {
        output::print_json(&serde_json::json!({ "removed": existed, "id": id }));
        return Ok(());
    }
    if existed {
        println!("  Planta {id} eliminada del jardín.");
    } else {
        println!("  No se encontró planta con ID {id}.");
    }
    Ok(())
}

/// Apply a partial update to a saved plant.
pub async fn run_edit(id: &str, fields: EditFields) -> Result<()> {
    let store = PlantStore::new(crate::cli::open_storage()?);

    if store.find(id).is_none() {
        println!("  No se encontró planta con ID {id}.");
        return Ok(());
    }

    let status = fields.status.as_deref().map(parse_status).transpose()?;
    let patch = PlantPatch {
        name: fields.name,
        location: fields.location,
        status,
        needs_water: if fields.watered {
            Some(false)
        } else {
            fields.needs_water
        },
        next_watering: fields.next_watering,
        diagnosis: None,
    };
    store.update(id, patch)?;

    if output::is_json() {
        output::print_json(&serde_json::json!({ "updated": true, "id": id }));
    } else {
        println!("  Planta {id} actualizada.");
    }
    Ok(())
}

/// Report garden storage usage.
pub async fn run_info() -> Result<()> {
    let store = PlantStore::new(crate::cli::open_storage()?);
    let info = store.storage_info();

    if output::is_json() {
        output::print_json(&serde_json::to_value(&info)?);
        return Ok(());
    }
    println!("  Plantas guardadas: {}", info.count);
    println!("  Tamaño estimado:   {}", info.estimated_size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("healthy").unwrap(), PlantStatus::Healthy);
        assert_eq!(parse_status("SICK").unwrap(), PlantStatus::Sick);
        assert!(parse_status("thriving").is_err());
    }
}
