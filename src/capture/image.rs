//! Image payload handling: MIME sniffing, data-URI encoding, and the
//! file-selection fallback source.

use crate::capture::{CaptureError, CapturedFrame, FrameSource};
use async_trait::async_trait;
use base64::Engine as _;
use std::path::{Path, PathBuf};

/// Identify a supported image format from its magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        return Some("image/png");
    }
    if bytes.starts_with(b"GIF8") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    None
}

/// Encode image bytes as a `data:<mime>;base64,` URI.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{data}")
}

/// Fallback frame source: a user-selected image file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl FrameSource for FileSource {
    async fn acquire(&self) -> Result<CapturedFrame, CaptureError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let mime = sniff_mime(&bytes)
            .ok_or_else(|| CaptureError::NotAnImage(self.path.display().to_string()))?;
        Ok(CapturedFrame { bytes, mime })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    #[test]
    fn test_sniff_known_formats() {
        assert_eq!(sniff_mime(JPEG_HEADER), Some("image/jpeg"));
        assert_eq!(sniff_mime(&[0x89, b'P', b'N', b'G', 0x0D]), Some("image/png"));
        assert_eq!(sniff_mime(b"GIF89a..."), Some("image/gif"));
        assert_eq!(sniff_mime(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_mime(b"hello world"), None);
        assert_eq!(sniff_mime(&[]), None);
    }

    #[test]
    fn test_data_uri_encoding() {
        let uri = to_data_uri("image/jpeg", &[0xFF, 0xD8, 0xFF]);
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        let payload = uri.strip_prefix("data:image/jpeg;base64,").unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        assert_eq!(decoded, vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_file_source_reads_and_sniffs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.jpg");
        std::fs::write(&path, JPEG_HEADER).unwrap();

        let frame = tokio_test::block_on(FileSource::new(&path).acquire()).unwrap();
        assert_eq!(frame.mime, "image/jpeg");
        assert_eq!(frame.bytes, JPEG_HEADER);
        assert!(frame.to_data_uri().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_file_source_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "no soy una imagen").unwrap();

        let err = tokio_test::block_on(FileSource::new(&path).acquire()).unwrap_err();
        assert!(matches!(err, CaptureError::NotAnImage(_)));
    }

    #[test]
    fn test_file_source_missing_file_is_io() {
        let err =
            tokio_test::block_on(FileSource::new("/no/such/file.jpg").acquire()).unwrap_err();
        assert!(matches!(err, CaptureError::Io(_)));
    }
}
