//! Primary frame source: a local camera, driven through an external
//! still-frame grabber.
//!
//! Verdia does not talk to video devices directly; it locates a known
//! grabber on PATH (`fswebcam`, `ffmpeg`, or `imagesnap`) and asks it for a
//! single JPEG frame. The temp file the grabber writes into is removed on
//! every exit path, captured or not.

use crate::capture::{CaptureError, CapturedFrame, FrameSource};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Which grabber tool was found on PATH.
#[derive(Debug, Clone)]
pub enum Grabber {
    Fswebcam(PathBuf),
    Ffmpeg(PathBuf),
    Imagesnap(PathBuf),
}

impl Grabber {
    /// Probe PATH for a supported grabber, in preference order.
    pub fn detect() -> Option<Self> {
        if let Ok(path) = which::which("fswebcam") {
            return Some(Self::Fswebcam(path));
        }
        if let Ok(path) = which::which("ffmpeg") {
            return Some(Self::Ffmpeg(path));
        }
        if let Ok(path) = which::which("imagesnap") {
            return Some(Self::Imagesnap(path));
        }
        None
    }

    /// Binary path of the grabber.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Fswebcam(p) | Self::Ffmpeg(p) | Self::Imagesnap(p) => p,
        }
    }

    /// Tool name, for the doctor report.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fswebcam(_) => "fswebcam",
            Self::Ffmpeg(_) => "ffmpeg",
            Self::Imagesnap(_) => "imagesnap",
        }
    }

    fn command(&self, device: Option<&str>, out: &PathBuf) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(self.path());
        match self {
            Self::Fswebcam(_) => {
                if let Some(dev) = device {
                    cmd.args(["-d", dev]);
                }
                cmd.args(["-q", "--no-banner", "-r", "1280x720"]).arg(out);
            }
            Self::Ffmpeg(_) => {
                let dev = device.unwrap_or("/dev/video0");
                cmd.args(["-y", "-loglevel", "error", "-f", "v4l2", "-i", dev])
                    .args(["-frames:v", "1"])
                    .arg(out);
            }
            Self::Imagesnap(_) => {
                if let Some(dev) = device {
                    cmd.args(["-d", dev]);
                }
                cmd.arg("-q").arg(out);
            }
        }
        cmd
    }
}

/// Camera-backed frame source.
pub struct CameraSource {
    grabber: Grabber,
    device: Option<String>,
}

impl CameraSource {
    /// Use the first grabber found on PATH; `NoDevice` if none is installed.
    pub fn detect(device: Option<String>) -> Result<Self, CaptureError> {
        let grabber = Grabber::detect().ok_or(CaptureError::NoDevice)?;
        debug!(grabber = grabber.name(), "camera grabber detected");
        Ok(Self { grabber, device })
    }
}

#[async_trait]
impl FrameSource for CameraSource {
    async fn acquire(&self) -> Result<CapturedFrame, CaptureError> {
        let out = std::env::temp_dir().join(format!("verdia-frame-{}.jpg", std::process::id()));

        let result = self.grab_into(&out).await;

        // The frame file is transient either way.
        let _ = std::fs::remove_file(&out);
        result
    }

    fn describe(&self) -> String {
        format!("cámara ({})", self.grabber.name())
    }
}

impl CameraSource {
    async fn grab_into(&self, out: &PathBuf) -> Result<CapturedFrame, CaptureError> {
        let output = self
            .grabber
            .command(self.device.as_deref(), out)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_grabber_failure(&stderr));
        }

        let bytes = std::fs::read(out)?;
        if bytes.is_empty() {
            return Err(CaptureError::Unknown(
                "grabber produced an empty frame".to_string(),
            ));
        }
        let mime = crate::capture::image::sniff_mime(&bytes).unwrap_or("image/jpeg");
        Ok(CapturedFrame { bytes, mime })
    }
}

/// Map grabber stderr onto the acquisition failure taxonomy.
fn classify_grabber_failure(stderr: &str) -> CaptureError {
    let lower = stderr.to_lowercase();
    if lower.contains("permission denied") || lower.contains("operation not permitted") {
        return CaptureError::PermissionDenied;
    }
    if lower.contains("no such file or directory")
        || lower.contains("no such device")
        || lower.contains("cannot find")
        || lower.contains("no camera")
    {
        return CaptureError::NoDevice;
    }
    if lower.contains("busy") || lower.contains("in use") {
        return CaptureError::DeviceBusy;
    }
    CaptureError::Unknown(stderr.trim().to_string())
}
