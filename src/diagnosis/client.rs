//! Async client for the external diagnosis service.
//!
//! One request, one response. No caching and no retry: a failed attempt is
//! surfaced immediately and the user decides whether to try again.

use crate::config::ApiConfig;
use crate::diagnosis::schema;
use crate::diagnosis::types::DiagnosisResult;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Failures of a single diagnosis attempt.
#[derive(Error, Debug)]
pub enum DiagnosisError {
    /// No API credential configured.
    #[error("no API credential configured — set VERDIA_API_KEY")]
    MissingApiKey,

    /// Transport-level failure before a response arrived.
    #[error("diagnosis request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("diagnosis service returned HTTP {status}: {message}")]
    Service { status: u16, message: String },

    /// The ceiling elapsed before the service answered.
    #[error("diagnosis timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The response was not valid JSON or was missing required fields.
    #[error("diagnosis response malformed: {0}")]
    Parse(String),
}

impl DiagnosisError {
    /// Spanish user-facing message, matching the app's error register.
    pub fn user_message(&self) -> String {
        let detail = match self {
            Self::MissingApiKey => {
                "falta la credencial del servicio (define VERDIA_API_KEY)".to_string()
            }
            Self::Network(_) => "no se pudo contactar el servicio de diagnóstico".to_string(),
            Self::Service { status, .. } => {
                format!("el servicio respondió con un error (HTTP {status})")
            }
            Self::Timeout { secs } => format!("el análisis tardó más de {secs} segundos"),
            Self::Parse(_) => "la respuesta del servicio no se pudo interpretar".to_string(),
        };
        format!("Error al analizar la planta: {detail}")
    }

    /// Whether a plain retry is worth offering to the user.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout { .. } | Self::Service { .. }
        )
    }
}

/// Client for the `generateContent` endpoint of the inference service.
#[derive(Clone)]
pub struct DiagnosisClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl DiagnosisClient {
    /// Build a client from runtime configuration.
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        }
    }

    /// Point the client at a different service base URL (tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the call ceiling (tests).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Diagnose the plant in the given image.
    ///
    /// `image` is a `data:<mime>;base64,` URI or a bare base64 JPEG payload.
    /// The call races a timer with the request; whichever settles first wins
    /// and the loser is dropped, so the caller always observes success, a
    /// typed failure, or a timeout — never a dangling in-flight state.
    pub async fn diagnose(&self, image: &str) -> Result<DiagnosisResult, DiagnosisError> {
        let api_key = self.api_key.clone().ok_or(DiagnosisError::MissingApiKey)?;
        let (mime_type, data) = split_image_payload(image);

        let request_id = Uuid::new_v4();
        debug!(%request_id, model = %self.model, bytes = data.len(), "sending diagnosis request");

        let call = self.call_service(&api_key, mime_type, data);
        tokio::select! {
            result = call => {
                match &result {
                    Ok(r) => debug!(%request_id, confidence = r.confidence, "diagnosis received"),
                    Err(e) => debug!(%request_id, "diagnosis attempt failed: {e}"),
                }
                result
            }
            _ = tokio::time::sleep(self.timeout) => {
                debug!(%request_id, "diagnosis timed out, abandoning in-flight call");
                Err(DiagnosisError::Timeout { secs: self.timeout.as_secs() })
            }
        }
    }

    async fn call_service(
        &self,
        api_key: &str,
        mime_type: &str,
        data: &str,
    ) -> Result<DiagnosisResult, DiagnosisError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = schema::request_body(mime_type, data);

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DiagnosisError::Service {
                status: status.as_u16(),
                message: truncate(&message, 200),
            });
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| DiagnosisError::Parse(format!("response envelope is not JSON: {e}")))?;

        let text = envelope
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                DiagnosisError::Parse("response envelope has no candidate text".to_string())
            })?;

        schema::parse_result(text)
    }
}

/// Split a data URI into its MIME type and base64 payload.
///
/// Bare base64 input is passed through as JPEG, mirroring how captures were
/// historically stored.
fn split_image_payload(image: &str) -> (&str, &str) {
    use regex::Regex;
    use std::sync::OnceLock;

    static DATA_URI: OnceLock<Regex> = OnceLock::new();
    let re = DATA_URI
        .get_or_init(|| Regex::new(r"^data:([^;,]+);base64,(.*)$").expect("valid data-URI regex"));

    match re.captures(image) {
        Some(caps) => {
            let mime = caps.get(1).map_or("image/jpeg", |m| m.as_str());
            let data = caps.get(2).map_or("", |m| m.as_str());
            (mime, data)
        }
        None => ("image/jpeg", image),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_data_uri() {
        let (mime, data) = split_image_payload("data:image/png;base64,QUJD");
        assert_eq!(mime, "image/png");
        assert_eq!(data, "QUJD");
    }

    #[test]
    fn test_split_bare_base64_defaults_to_jpeg() {
        let (mime, data) = split_image_payload("QUJDRA==");
        assert_eq!(mime, "image/jpeg");
        assert_eq!(data, "QUJDRA==");
    }

    #[test]
    fn test_missing_key_fails_before_any_request() {
        let config = ApiConfig {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            // Unroutable: proves no request is attempted.
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(1),
        };
        let client = DiagnosisClient::new(&config);
        let err = tokio_test::block_on(client.diagnose("QUJD")).unwrap_err();
        assert!(matches!(err, DiagnosisError::MissingApiKey));
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let timeout = DiagnosisError::Timeout { secs: 30 };
        let parse = DiagnosisError::Parse("x".to_string());
        assert_ne!(timeout.user_message(), parse.user_message());
        assert!(timeout.user_message().starts_with("Error al analizar la planta"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "ñañañaña";
        let t = truncate(s, 5);
        assert!(t.chars().count() <= 6);
    }
}
