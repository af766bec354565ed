//! Plant diagnosis via an external multimodal inference service.
//!
//! One image in, one structured result out. The service is asked for a
//! JSON-shaped response constrained by a declared output schema; the reply
//! is validated at the boundary before it becomes a [`DiagnosisResult`].

pub mod client;
pub mod schema;
pub mod types;

pub use client::{DiagnosisClient, DiagnosisError};
pub use types::{DiagnosisAction, DiagnosisResult, RootCause, Severity};
