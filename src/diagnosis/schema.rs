//! Wire contract with the inference service: declared output schema,
//! instruction text, and the validating parse of the reply.
//!
//! The service is loosely coupled to us by JSON field names, so nothing
//! from the wire is trusted as already typed. `parse_result` rejects any
//! payload that is not valid JSON or is missing a required field; a
//! partially populated result never escapes this module.

use crate::diagnosis::client::DiagnosisError;
use crate::diagnosis::types::{DiagnosisAction, DiagnosisResult, RootCause, Severity};
use serde_json::{json, Value};

/// Fixed instruction sent alongside the image.
pub const INSTRUCTION: &str = "Analyze this plant image. Identify the species and check for \
     any diseases or nutrient deficiencies. Provide a professional diagnosis following the \
     strategic product guidelines: identify what it is, its impact, an immediate action plan, \
     and root causes. Return the response in Spanish.";

/// Declared output schema, in the service's schema dialect.
///
/// Field names and required lists mirror [`DiagnosisResult`] exactly so the
/// service constrains its own output shape.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "speciesName": { "type": "STRING", "description": "Common name of the plant" },
            "scientificName": { "type": "STRING", "description": "Scientific name" },
            "problemName": { "type": "STRING", "description": "Main issue detected (e.g., Potassium Deficiency)" },
            "confidence": { "type": "NUMBER", "description": "Confidence score 0-1" },
            "impact": { "type": "STRING", "description": "Brief explanation of how this affects the plant" },
            "isContagious": { "type": "BOOLEAN" },
            "severity": { "type": "STRING", "description": "low, moderate, or high" },
            "actionPlan": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "icon": { "type": "STRING", "description": "Material symbol icon name related to the action" }
                    },
                    "required": ["title", "description", "icon"]
                }
            },
            "rootCauses": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "image": { "type": "STRING", "description": "A placeholder URL for the cause visual" }
                    },
                    "required": ["title", "description", "image"]
                }
            }
        },
        "required": ["speciesName", "scientificName", "problemName", "confidence",
                      "impact", "severity", "actionPlan", "rootCauses"]
    })
}

/// Build the full request body for a `generateContent` call.
pub fn request_body(mime_type: &str, base64_data: &str) -> Value {
    json!({
        "contents": [{
            "parts": [
                { "inlineData": { "mimeType": mime_type, "data": base64_data } },
                { "text": INSTRUCTION }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

/// Validate and convert the service's JSON text into a [`DiagnosisResult`].
pub fn parse_result(raw: &str) -> Result<DiagnosisResult, DiagnosisError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| DiagnosisError::Parse(format!("response is not valid JSON: {e}")))?;

    let obj = value
        .as_object()
        .ok_or_else(|| DiagnosisError::Parse("response is not a JSON object".to_string()))?;

    let confidence = normalize_confidence(obj.get("confidence"))?;
    let severity = parse_severity(req_str(obj, "severity")?)?;

    let action_plan = req_array(obj, "actionPlan")?
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let entry = entry.as_object().ok_or_else(|| {
                DiagnosisError::Parse(format!("actionPlan[{i}] is not an object"))
            })?;
            Ok(DiagnosisAction {
                title: req_str(entry, "title")?.to_string(),
                description: req_str(entry, "description")?.to_string(),
                icon: req_str(entry, "icon")?.to_string(),
            })
        })
        .collect::<Result<Vec<_>, DiagnosisError>>()?;

    let root_causes = req_array(obj, "rootCauses")?
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let entry = entry.as_object().ok_or_else(|| {
                DiagnosisError::Parse(format!("rootCauses[{i}] is not an object"))
            })?;
            Ok(RootCause {
                title: req_str(entry, "title")?.to_string(),
                description: req_str(entry, "description")?.to_string(),
                // The schema asks for an image per cause, but the view has a
                // placeholder for it — tolerate its absence.
                image: entry
                    .get("image")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            })
        })
        .collect::<Result<Vec<_>, DiagnosisError>>()?;

    Ok(DiagnosisResult {
        species_name: req_str(obj, "speciesName")?.to_string(),
        scientific_name: req_str(obj, "scientificName")?.to_string(),
        problem_name: req_str(obj, "problemName")?.to_string(),
        confidence,
        impact: req_str(obj, "impact")?.to_string(),
        is_contagious: obj
            .get("isContagious")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        severity,
        action_plan,
        root_causes,
    })
}

/// Round the raw 0.0–1.0 probability into an integer percentage.
///
/// Out-of-range values clamp rather than overflow; a missing or non-numeric
/// value is a parse failure, never `NaN` or a negative percentage.
fn normalize_confidence(raw: Option<&Value>) -> Result<u8, DiagnosisError> {
    let number = raw
        .and_then(Value::as_f64)
        .ok_or_else(|| DiagnosisError::Parse("missing or non-numeric `confidence`".to_string()))?;
    if !number.is_finite() {
        return Err(DiagnosisError::Parse("non-finite `confidence`".to_string()));
    }
    Ok((number.clamp(0.0, 1.0) * 100.0).round() as u8)
}

fn parse_severity(raw: &str) -> Result<Severity, DiagnosisError> {
    match raw.to_ascii_lowercase().as_str() {
        "low" => Ok(Severity::Low),
        "moderate" => Ok(Severity::Moderate),
        "high" => Ok(Severity::High),
        other => Err(DiagnosisError::Parse(format!(
            "unknown severity \"{other}\""
        ))),
    }
}

fn req_str<'a>(
    obj: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Result<&'a str, DiagnosisError> {
    obj.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| DiagnosisError::Parse(format!("missing required field `{field}`")))
}

fn req_array<'a>(
    obj: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Result<&'a Vec<Value>, DiagnosisError> {
    obj.get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| DiagnosisError::Parse(format!("missing required field `{field}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> Value {
        json!({
            "speciesName": "Monstera",
            "scientificName": "Monstera deliciosa",
            "problemName": "Deficiencia de potasio",
            "confidence": 0.873,
            "impact": "Las hojas amarillean desde los bordes.",
            "isContagious": false,
            "severity": "moderate",
            "actionPlan": [
                { "title": "Riego profundo", "description": "Riega hasta drenar.", "icon": "water_drop" }
            ],
            "rootCauses": [
                { "title": "Sustrato agotado", "description": "Sin nutrientes.", "image": "https://picsum.photos/200" }
            ]
        })
    }

    #[test]
    fn test_parse_valid_payload() {
        let result = parse_result(&valid_payload().to_string()).unwrap();
        assert_eq!(result.species_name, "Monstera");
        assert_eq!(result.confidence, 87);
        assert_eq!(result.severity, Severity::Moderate);
        assert_eq!(result.action_plan.len(), 1);
        assert_eq!(result.action_plan[0].icon, "water_drop");
        assert_eq!(result.root_causes.len(), 1);
    }

    #[test]
    fn test_confidence_one_maps_to_hundred() {
        let mut payload = valid_payload();
        payload["confidence"] = json!(1.0);
        let result = parse_result(&payload.to_string()).unwrap();
        assert_eq!(result.confidence, 100);
    }

    #[test]
    fn test_confidence_out_of_range_clamps() {
        let mut payload = valid_payload();
        payload["confidence"] = json!(1.4);
        assert_eq!(parse_result(&payload.to_string()).unwrap().confidence, 100);

        payload["confidence"] = json!(-0.2);
        assert_eq!(parse_result(&payload.to_string()).unwrap().confidence, 0);
    }

    #[test]
    fn test_confidence_missing_is_parse_failure() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("confidence");
        let err = parse_result(&payload.to_string()).unwrap_err();
        assert!(matches!(err, DiagnosisError::Parse(_)));
    }

    #[test]
    fn test_confidence_non_numeric_is_parse_failure() {
        let mut payload = valid_payload();
        payload["confidence"] = json!("alta");
        let err = parse_result(&payload.to_string()).unwrap_err();
        assert!(matches!(err, DiagnosisError::Parse(_)));
    }

    #[test]
    fn test_missing_required_field_rejects_whole_result() {
        for field in ["speciesName", "problemName", "impact", "actionPlan", "rootCauses"] {
            let mut payload = valid_payload();
            payload.as_object_mut().unwrap().remove(field);
            let err = parse_result(&payload.to_string()).unwrap_err();
            assert!(
                matches!(err, DiagnosisError::Parse(_)),
                "removing {field} should be a parse failure"
            );
        }
    }

    #[test]
    fn test_unknown_severity_is_parse_failure() {
        let mut payload = valid_payload();
        payload["severity"] = json!("catastrophic");
        assert!(matches!(
            parse_result(&payload.to_string()).unwrap_err(),
            DiagnosisError::Parse(_)
        ));
    }

    #[test]
    fn test_missing_contagion_defaults_to_false() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("isContagious");
        let result = parse_result(&payload.to_string()).unwrap();
        assert!(!result.is_contagious);
    }

    #[test]
    fn test_root_cause_image_is_optional() {
        let mut payload = valid_payload();
        payload["rootCauses"][0]
            .as_object_mut()
            .unwrap()
            .remove("image");
        let result = parse_result(&payload.to_string()).unwrap();
        assert!(result.root_causes[0].image.is_none());
    }

    #[test]
    fn test_action_plan_entry_missing_icon_rejects() {
        let mut payload = valid_payload();
        payload["actionPlan"][0]
            .as_object_mut()
            .unwrap()
            .remove("icon");
        assert!(matches!(
            parse_result(&payload.to_string()).unwrap_err(),
            DiagnosisError::Parse(_)
        ));
    }

    #[test]
    fn test_free_text_is_parse_failure() {
        let err = parse_result("La planta parece sana.").unwrap_err();
        assert!(matches!(err, DiagnosisError::Parse(_)));
    }

    #[test]
    fn test_request_body_shape() {
        use assert_json_diff::assert_json_include;

        let body = request_body("image/jpeg", "QUJD");
        assert_json_include!(
            actual: body.clone(),
            expected: json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "OBJECT" }
                }
            })
        );
        assert_eq!(body["contents"][0]["parts"][0]["inlineData"]["data"], "QUJD");
        assert_eq!(
            body["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "image/jpeg"
        );
    }
}
