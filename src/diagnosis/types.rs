//! Structured diagnosis result returned by the inference service.
//!
//! Ephemeral: nothing here is persisted unless the user explicitly saves
//! the plant, at which point a snapshot is derived from it.

use serde::{Deserialize, Serialize};

/// How serious the detected problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    /// Spanish impact label shown next to the result badge.
    pub fn impact_label(&self) -> &'static str {
        match self {
            Self::Low => "Bajo",
            Self::Moderate => "Moderado",
            Self::High => "Crítico",
        }
    }
}

/// One step of the immediate action plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisAction {
    pub title: String,
    pub description: String,
    /// Material-symbol icon name related to the action.
    pub icon: String,
}

/// One probable root cause of the detected problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootCause {
    pub title: String,
    pub description: String,
    /// Visual reference for the cause, when the service provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A complete plant diagnosis.
///
/// Natural-language fields arrive in Spanish; identifiers are fixed English
/// names. `confidence` is already normalized to an integer percentage — the
/// raw 0.0–1.0 value from the wire never leaves the parsing boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    /// Common name of the identified species.
    pub species_name: String,
    /// Scientific name.
    pub scientific_name: String,
    /// Main issue detected (e.g. "Deficiencia de potasio").
    pub problem_name: String,
    /// Match confidence, 0–100.
    pub confidence: u8,
    /// How the problem affects the plant.
    pub impact: String,
    /// Whether the problem can spread to nearby plants.
    pub is_contagious: bool,
    /// Problem severity.
    pub severity: Severity,
    /// Ordered immediate action plan.
    pub action_plan: Vec<DiagnosisAction>,
    /// Ordered probable root causes.
    pub root_causes: Vec<RootCause>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Moderate);
        assert!(Severity::Moderate < Severity::High);
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Low.impact_label(), "Bajo");
        assert_eq!(Severity::High.impact_label(), "Crítico");
    }
}
