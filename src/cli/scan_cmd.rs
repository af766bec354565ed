//! `verdia scan` — capture a photo and run the diagnosis flow.
//!
//! The image comes from the camera (`--camera`) or from a selected file.
//! Either way it lands in the transient capture slot as a data URI before
//! the diagnosis flow is triggered, so `verdia diagnose` can rerun the
//! analysis on the same photo later.

use crate::capture::{CameraSource, CaptureSlot, FileSource, FrameSource};
use crate::cli::output::{self, Styled};
use anyhow::Result;
use std::path::PathBuf;

/// Run the capture pipeline and then the diagnosis flow.
pub async fn run(
    image: Option<PathBuf>,
    camera: bool,
    device: Option<String>,
    save: bool,
    name: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let s = Styled::new();

    let source: Box<dyn FrameSource> = if camera {
        match CameraSource::detect(device) {
            Ok(camera) => Box::new(camera),
            Err(e) => {
                eprintln!("  {} {}", s.err_sym(), e.user_message());
                std::process::exit(1);
            }
        }
    } else if let Some(path) = image {
        Box::new(FileSource::new(path))
    } else {
        eprintln!(
            "  {} Indica una imagen ('verdia scan foto.jpg') o usa --camera.",
            s.warn_sym()
        );
        std::process::exit(1);
    };

    if !output::is_quiet() && !output::is_json() {
        println!("  Capturando desde {}...", source.describe());
    }

    let frame = match source.acquire().await {
        Ok(frame) => frame,
        Err(e) => {
            eprintln!("  {} {}", s.err_sym(), e.user_message());
            eprintln!("  Puedes volver a intentarlo con 'verdia scan'.");
            std::process::exit(1);
        }
    };

    let storage = crate::cli::open_storage()?;
    let slot = CaptureSlot::new(storage);
    if let Err(e) = slot.store(&frame.to_data_uri()) {
        eprintln!("  {} No se pudo guardar la captura: {e}", s.err_sym());
        std::process::exit(1);
    }

    if !output::is_quiet() && !output::is_json() {
        println!("  Foto lista para el diagnóstico.");
    }

    crate::cli::diagnose_cmd::run(save, name, location).await
}
