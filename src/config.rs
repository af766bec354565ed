//! Runtime configuration — API credential, model selection, data directory.
//!
//! ## Credential lookup
//!
//! The diagnosis service key is loaded from (in order of priority):
//! 1. `VERDIA_API_KEY` env
//! 2. `GEMINI_API_KEY` env (the upstream service's conventional name)
//!
//! A missing key is not a startup error: it is carried as `None` and the
//! diagnosis client maps it to an authorization failure, so the CLI renders
//! it like any other failed attempt instead of crashing.

use std::path::PathBuf;
use std::time::Duration;

/// Default inference model used for plant diagnosis.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default base URL of the inference service.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Ceiling on a single diagnosis call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the external diagnosis service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API credential, if configured.
    pub api_key: Option<String>,
    /// Model identifier (e.g. "gemini-1.5-flash").
    pub model: String,
    /// Base URL of the service.
    pub base_url: String,
    /// Ceiling on a single diagnosis call.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from the environment.
    ///
    /// Recognized variables: `VERDIA_API_KEY` / `GEMINI_API_KEY`,
    /// `VERDIA_MODEL`, `VERDIA_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("VERDIA_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());

        let model =
            std::env::var("VERDIA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let timeout_secs = std::env::var("VERDIA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Construct a config with an explicit key (used by tests).
    pub fn with_key(api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Resolve the data directory holding the persisted garden and capture slot.
///
/// `VERDIA_DATA_DIR` overrides the default of `~/.verdia/`.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VERDIA_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".verdia")
}
