//! Environment readiness check.

use crate::capture::camera::Grabber;
use crate::config;
use crate::garden::storage::{FileStorage, KeyValueStorage};
use crate::garden::PlantStore;
use anyhow::Result;
use std::sync::Arc;

/// Check API credential, camera grabber, and storage health.
pub async fn run() -> Result<()> {
    println!("Verdia Doctor");
    println!("=============");
    println!();

    // OS and architecture
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    // API credential
    let config = config::ApiConfig::from_env();
    let has_key = config.api_key.is_some();
    if has_key {
        println!("[OK] API credential configured (model: {})", config.model);
    } else {
        println!("[!!] API credential NOT configured. Set VERDIA_API_KEY (or GEMINI_API_KEY).");
    }

    // Camera grabber
    match Grabber::detect() {
        Some(grabber) => println!(
            "[OK] Camera grabber found: {} ({})",
            grabber.name(),
            grabber.path().display()
        ),
        None => println!(
            "[!!] No camera grabber found (fswebcam, ffmpeg, imagesnap). \
             'verdia scan --camera' will not work; file capture still does."
        ),
    }

    // Storage
    let data_dir = config::data_dir();
    let storage_ok = match FileStorage::open(data_dir.clone()) {
        Ok(storage) => {
            let probe = storage.set("doctor_probe", "ok").is_ok();
            let _ = storage.remove("doctor_probe");
            if probe {
                println!("[OK] Data directory writable: {}", data_dir.display());
                let store = PlantStore::new(Arc::new(storage) as Arc<dyn KeyValueStorage>);
                let info = store.storage_info();
                println!(
                    "     {} plantas guardadas ({})",
                    info.count, info.estimated_size
                );
            } else {
                println!("[!!] Data directory not writable: {}", data_dir.display());
            }
            probe
        }
        Err(e) => {
            println!("[!!] Could not open data directory {}: {e}", data_dir.display());
            false
        }
    };

    println!();
    if has_key && storage_ok {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
        if !has_key {
            println!("  Set VERDIA_API_KEY to enable diagnosis.");
        }
    }

    Ok(())
}
