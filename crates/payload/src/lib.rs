//! Image payload encoding for the analysis gateway.
//!
//! Converts raw image bytes and files into the base64 payloads the AI service
//! expects, and turns inline image replies back into data URLs:
//! - `encode_base64` / `decode_base64`: plain base64 with the standard alphabet
//! - `strip_data_url_prefix`: drop a `data:<mime>;base64,` header
//! - `ImagePayload`: a mime-tagged base64 image
//! - `read_image_file`: file to payload, with the mime type guessed from the extension

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Mime type used when an inline image reply carries none.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Errors from payload conversion.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),

    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Encode bytes as standard base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode a standard base64 payload, tolerating a leading data-URL header.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, PayloadError> {
    Ok(BASE64.decode(strip_data_url_prefix(payload).trim())?)
}

/// Return the payload after the data-URL header.
///
/// Input without a header is returned unchanged.
pub fn strip_data_url_prefix(payload: &str) -> &str {
    if !payload.starts_with("data:") {
        return payload;
    }
    match payload.split_once(',') {
        Some((_, data)) => data,
        None => payload,
    }
}

/// A mime-tagged base64 image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub mime_type: String,
    /// Base64 data without any data-URL header
    pub data: String,
}

impl ImagePayload {
    /// Build a payload from already-encoded base64 data.
    ///
    /// An empty mime type falls back to `image/png`.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        Self {
            mime_type: if mime_type.is_empty() {
                DEFAULT_IMAGE_MIME.to_string()
            } else {
                mime_type
            },
            data: data.into(),
        }
    }

    /// Encode raw bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, encode_base64(bytes))
    }

    /// Parse a `data:<mime>;base64,<data>` URL.
    pub fn from_data_url(url: &str) -> Result<Self, PayloadError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| PayloadError::MalformedDataUrl("missing data: scheme".to_string()))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| PayloadError::MalformedDataUrl("missing comma".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| PayloadError::MalformedDataUrl(format!("not base64: {}", header)))?;

        Ok(Self::new(mime_type, data))
    }

    /// Render as a self-describing data URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the payload back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, PayloadError> {
        Ok(BASE64.decode(self.data.trim())?)
    }

    /// File extension matching the mime type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/svg+xml" => "svg",
            _ => "png",
        }
    }
}

/// Guess an image mime type from a file extension.
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Read an image file into a payload.
///
/// No size or format validation is done; unreadable content only fails
/// later, at the service.
pub async fn read_image_file(path: impl AsRef<Path>) -> Result<ImagePayload, PayloadError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    Ok(ImagePayload::from_bytes(mime_from_path(path), &bytes))
}

/// Read a file and return its base64 payload with no data-URL header.
pub async fn file_to_base64(path: impl AsRef<Path>) -> Result<String, PayloadError> {
    Ok(read_image_file(path).await?.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url_prefix("QUJD"), "QUJD");
    }

    #[test]
    fn test_decode_recovers_bytes_through_data_url() {
        let bytes: Vec<u8> = (0..=255).collect();
        let url = ImagePayload::from_bytes("image/jpeg", &bytes).to_data_url();
        assert_eq!(decode_base64(&url).unwrap(), bytes);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode_base64(&[]), "");
        assert!(decode_base64("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_data_url() {
        let payload = ImagePayload::from_data_url("data:image/webp;base64,AAEC").unwrap();
        assert_eq!(payload.mime_type, "image/webp");
        assert_eq!(payload.data, "AAEC");
        assert_eq!(payload.extension(), "webp");
        assert_eq!(payload.decode().unwrap(), vec![0u8, 1, 2]);
    }

    #[test]
    fn test_malformed_data_url() {
        assert!(matches!(
            ImagePayload::from_data_url("image/png;base64,AAEC"),
            Err(PayloadError::MalformedDataUrl(_))
        ));
        assert!(matches!(
            ImagePayload::from_data_url("data:image/png,AAEC"),
            Err(PayloadError::MalformedDataUrl(_))
        ));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(decode_base64("!!!"), Err(PayloadError::Decode(_))));
    }

    #[test]
    fn test_empty_mime_defaults_to_png() {
        let payload = ImagePayload::new("", "AAEC");
        assert_eq!(payload.to_data_url(), "data:image/png;base64,AAEC");
    }

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path(Path::new("logo.JPG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("logo.png")), "image/png");
        assert_eq!(mime_from_path(Path::new("logo")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_file_to_base64() {
        let path = std::env::temp_dir().join(format!("trulogo-payload-{}.jpg", std::process::id()));
        let bytes = b"\xFF\xD8\xFF\xE0 not really a jpeg".to_vec();
        tokio::fs::write(&path, &bytes).await.unwrap();

        let payload = read_image_file(&path).await.unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
        assert_eq!(decode_base64(&file_to_base64(&path).await.unwrap()).unwrap(), bytes);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = read_image_file("/definitely/not/here.png").await;
        assert!(matches!(result, Err(PayloadError::Io(_))));
    }
}
