//! CLI subcommand implementations for the verdia binary.

pub mod diagnose_cmd;
pub mod doctor;
pub mod garden_cmd;
pub mod output;
pub mod scan_cmd;
pub mod tip_cmd;

use crate::config;
use crate::garden::storage::{FileStorage, KeyValueStorage};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Open the on-disk storage backing the garden and the capture slot.
pub fn open_storage() -> Result<Arc<dyn KeyValueStorage>> {
    let dir = config::data_dir();
    let storage = FileStorage::open(dir.clone())
        .with_context(|| format!("could not open data directory: {}", dir.display()))?;
    Ok(Arc::new(storage))
}
