//! Image capture — one still frame from a camera or a file, encoded as a
//! data URI and handed to the transient capture slot.
//!
//! The primary path grabs a frame from a local camera through an external
//! grabber binary; the fallback path reads a user-selected image file. Both
//! end in the same place: a `data:<mime>;base64,` URI in the capture slot,
//! ready for the diagnosis flow.

pub mod camera;
pub mod image;
pub mod slot;

pub use camera::CameraSource;
pub use image::FileSource;
pub use slot::{CaptureSlot, CAPTURE_SLOT_KEY};

use async_trait::async_trait;
use thiserror::Error;

/// Why an acquisition attempt failed.
///
/// Every variant maps to a distinct user-facing message and all of them are
/// recoverable by retrying (possibly after the user fixes something).
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The OS denied access to the camera device.
    #[error("camera access denied")]
    PermissionDenied,

    /// No camera device is present, or no grabber tool is installed.
    #[error("no camera device found")]
    NoDevice,

    /// The device exists but is held by another process.
    #[error("camera device is busy")]
    DeviceBusy,

    /// The selected file is not a supported image format.
    #[error("file is not a supported image: {0}")]
    NotAnImage(String),

    /// Filesystem error reading the frame or the selected file.
    #[error("image read failed: {0}")]
    Io(#[from] std::io::Error),

    /// Anything the taxonomy above does not cover.
    #[error("capture failed: {0}")]
    Unknown(String),
}

impl CaptureError {
    /// Spanish user-facing message with its retry affordance.
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied => {
                "Permiso de cámara denegado. Autoriza el acceso a la cámara y vuelve a intentarlo."
                    .to_string()
            }
            Self::NoDevice => {
                "No se encontró ninguna cámara. Conecta una, o usa una foto existente con \
                 'verdia scan <imagen>'."
                    .to_string()
            }
            Self::DeviceBusy => {
                "La cámara está en uso por otra aplicación. Ciérrala y vuelve a intentarlo."
                    .to_string()
            }
            Self::NotAnImage(path) => {
                format!("El archivo '{path}' no es una imagen válida. Elige un JPEG, PNG, WebP o GIF.")
            }
            Self::Io(_) | Self::Unknown(_) => {
                "No se pudo capturar la imagen. Por favor, intenta de nuevo.".to_string()
            }
        }
    }
}

/// A captured still frame.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// MIME type of the encoding.
    pub mime: &'static str,
}

impl CapturedFrame {
    /// Encode the frame as a portable data URI.
    pub fn to_data_uri(&self) -> String {
        image::to_data_uri(self.mime, &self.bytes)
    }
}

/// Something that can produce one still frame.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Acquire a single frame.
    async fn acquire(&self) -> Result<CapturedFrame, CaptureError>;

    /// Short human-readable description of the source ("cámara", file name).
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_distinct() {
        let messages = [
            CaptureError::PermissionDenied.user_message(),
            CaptureError::NoDevice.user_message(),
            CaptureError::DeviceBusy.user_message(),
            CaptureError::NotAnImage("x.txt".to_string()).user_message(),
            CaptureError::Unknown("?".to_string()).user_message(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
