//! `verdia diagnose` — run the diagnosis flow over the captured image.
//!
//! Consumes the transient capture slot: peeks at it first, and only clears
//! it once a diagnosis succeeds so a failed attempt can be retried without
//! re-capturing. A missing slot redirects the user back to the gallery flow
//! instead of failing silently.

use crate::capture::CaptureSlot;
use crate::cli::output::{self, Styled};
use crate::config::ApiConfig;
use crate::diagnosis::{DiagnosisClient, DiagnosisError, DiagnosisResult, Severity};
use crate::garden::{CareDetails, DiagnosisSnapshot, NewPlant, PlantStatus, PlantStore};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Rotating loading messages shown while the service thinks.
pub const LOADING_MESSAGES: &[&str] = &[
    "Identificando la especie...",
    "Analizando síntomas visuales...",
    "Buscando en la base de datos de 400,000 especies...",
    "Generando plan de acción ecológico...",
    "Finalizando diagnóstico...",
];

/// How often the loading message rotates.
const MESSAGE_ROTATION: Duration = Duration::from_secs(2);

/// Run the diagnosis flow against the current capture slot.
pub async fn run(save: bool, name: Option<String>, location: Option<String>) -> Result<()> {
    let storage = crate::cli::open_storage()?;
    let slot = CaptureSlot::new(storage.clone());

    let Some(image) = slot.peek() else {
        let s = Styled::new();
        eprintln!(
            "  {} No hay ninguna foto capturada.",
            s.warn_sym()
        );
        eprintln!("  Vuelve a la galería y escanea una planta primero: 'verdia scan <imagen>'.");
        std::process::exit(1);
    };

    let client = DiagnosisClient::new(&ApiConfig::from_env());
    let result = diagnose_with_spinner(&client, &image).await;

    match result {
        Ok(diagnosis) => {
            // The slot's image has been consumed.
            slot.clear();

            if output::is_json() {
                output::print_json(&serde_json::to_value(&diagnosis)?);
            } else {
                println!("{}", render_result(&Styled::new(), &diagnosis));
            }

            if save {
                let store = PlantStore::new(storage);
                let new_plant = plant_from_diagnosis(&diagnosis, &image, name, location);
                match store.save(&new_plant) {
                    Ok(record) => {
                        if !output::is_quiet() && !output::is_json() {
                            println!("  Guardada en tu jardín como {}.", record.plant.id);
                        }
                    }
                    Err(e) => {
                        let s = Styled::new();
                        eprintln!("  {} No se pudo guardar la planta: {e}", s.err_sym());
                        eprintln!("  El diagnóstico sigue siendo válido; intenta guardar de nuevo.");
                        std::process::exit(1);
                    }
                }
            }
            Ok(())
        }
        Err(e) => {
            let s = Styled::new();
            eprintln!("  {} {}", s.err_sym(), e.user_message());
            if e.is_retryable() {
                eprintln!("  La foto sigue capturada: intenta de nuevo con 'verdia diagnose'.");
            }
            std::process::exit(1);
        }
    }
}

/// Call the client with the gallery's rotating loading messages.
async fn diagnose_with_spinner(
    client: &DiagnosisClient,
    image: &str,
) -> Result<DiagnosisResult, DiagnosisError> {
    if output::is_quiet() || output::is_json() {
        return client.diagnose(image).await;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("  {spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(LOADING_MESSAGES[0]);
    spinner.enable_steady_tick(Duration::from_millis(120));

    let call = client.diagnose(image);
    tokio::pin!(call);

    let mut msg_idx = 0;
    let result = loop {
        tokio::select! {
            result = &mut call => break result,
            _ = tokio::time::sleep(MESSAGE_ROTATION) => {
                msg_idx = (msg_idx + 1) % LOADING_MESSAGES.len();
                spinner.set_message(LOADING_MESSAGES[msg_idx]);
            }
        }
    };

    spinner.finish_and_clear();
    result
}

/// Render the result screen as text.
pub fn render_result(s: &Styled, result: &DiagnosisResult) -> String {
    let mut out = String::new();
    let push = |out: &mut String, line: String| {
        out.push_str(&line);
        out.push('\n');
    };

    push(&mut out, String::new());
    push(
        &mut out,
        format!(
            "  {} {}",
            s.ok_sym(),
            s.accent(&format!("{}% Coincidencia", result.confidence))
        ),
    );
    push(&mut out, format!("  {}", s.bold(&result.problem_name)));
    push(
        &mut out,
        format!("  {} ({})", result.species_name, result.scientific_name),
    );
    push(
        &mut out,
        format!(
            "  Impacto {}  ·  {}",
            result.severity.impact_label(),
            if result.is_contagious {
                "Contagioso"
            } else {
                "No contagioso"
            }
        ),
    );
    push(&mut out, format!("  {}", result.impact));
    push(&mut out, String::new());

    push(&mut out, format!("  {}", s.bold("Plan de Acción Inmediato")));
    for (i, action) in result.action_plan.iter().enumerate() {
        push(
            &mut out,
            format!("  {}. {} — {}", i + 1, action.title, action.description),
        );
    }
    push(&mut out, String::new());

    push(&mut out, format!("  {}", s.bold("Causas Probables")));
    for cause in &result.root_causes {
        push(
            &mut out,
            format!("  • {} — {}", cause.title, cause.description),
        );
    }
    out
}

/// Derive the persisted snapshot from a diagnosis.
pub fn snapshot_from(result: &DiagnosisResult) -> DiagnosisSnapshot {
    DiagnosisSnapshot {
        health: format!("Impacto {}", result.severity.impact_label()),
        problems: vec![result.problem_name.clone()],
        recommendations: result
            .action_plan
            .iter()
            .map(|a| a.title.clone())
            .collect(),
    }
}

/// Build the record to save from a diagnosis and the captured image.
pub fn plant_from_diagnosis(
    result: &DiagnosisResult,
    image: &str,
    name: Option<String>,
    location: Option<String>,
) -> NewPlant {
    let status = match result.severity {
        Severity::Low => PlantStatus::Healthy,
        Severity::Moderate => PlantStatus::Warning,
        Severity::High => PlantStatus::Sick,
    };
    NewPlant {
        name: name.unwrap_or_else(|| result.species_name.clone()),
        scientific_name: result.scientific_name.clone(),
        location: location.unwrap_or_else(|| "Mi Jardín".to_string()),
        image: image.to_string(),
        status,
        is_toxic: false,
        needs_water: false,
        care_details: CareDetails::unknown(),
        next_watering: "Sin programar".to_string(),
        diagnosis: Some(snapshot_from(result)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::{DiagnosisAction, RootCause};

    fn result() -> DiagnosisResult {
        DiagnosisResult {
            species_name: "Monstera".to_string(),
            scientific_name: "Monstera deliciosa".to_string(),
            problem_name: "Hoja quemada por sol directo".to_string(),
            confidence: 92,
            impact: "Manchas secas en las hojas expuestas.".to_string(),
            is_contagious: false,
            severity: Severity::Low,
            action_plan: vec![DiagnosisAction {
                title: "Reubicar la planta".to_string(),
                description: "Muévela a luz indirecta.".to_string(),
                icon: "wb_shade".to_string(),
            }],
            root_causes: vec![RootCause {
                title: "Sol directo".to_string(),
                description: "Exposición prolongada al mediodía.".to_string(),
                image: None,
            }],
        }
    }

    #[test]
    fn test_render_shows_confidence_badge_and_severity() {
        let rendered = render_result(&Styled::new(), &result());
        assert!(rendered.contains("92% Coincidencia"));
        assert!(rendered.contains("Impacto Bajo"));
        assert!(rendered.contains("No contagioso"));
        assert!(rendered.contains("Plan de Acción Inmediato"));
        assert!(rendered.contains("Causas Probables"));
    }

    #[test]
    fn test_snapshot_carries_problem_and_recommendations() {
        let snap = snapshot_from(&result());
        assert_eq!(snap.problems, vec!["Hoja quemada por sol directo"]);
        assert_eq!(snap.recommendations, vec!["Reubicar la planta"]);
    }

    #[test]
    fn test_plant_from_diagnosis_maps_severity_to_status() {
        let mut r = result();
        let plant = plant_from_diagnosis(&r, "data:image/jpeg;base64,AA", None, None);
        assert_eq!(plant.status, PlantStatus::Healthy);
        assert_eq!(plant.name, "Monstera");
        assert_eq!(plant.location, "Mi Jardín");

        r.severity = Severity::High;
        let plant = plant_from_diagnosis(&r, "x", Some("Mi Monstera".to_string()), None);
        assert_eq!(plant.status, PlantStatus::Sick);
        assert_eq!(plant.name, "Mi Monstera");
    }
}
