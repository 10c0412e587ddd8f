//! Photo encoding into data URLs.
//!
//! Photos are stored inline with the patient record as
//! `data:<mime>;base64,<payload>`. No resizing or recompression happens here.

use std::path::Path;

use base64::Engine;

/// Fallback MIME type for bytes that match no known image signature.
const OCTET_STREAM: &str = "application/octet-stream";

/// Error type for photo encoding.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Could not read photo {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),
}

/// Read a file and encode it as a data URL.
///
/// # Errors
/// Returns `EncodingError::Read` if the file cannot be read.
pub fn encode_file(path: &Path) -> Result<String, EncodingError> {
    let bytes = std::fs::read(path).map_err(|source| EncodingError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let mime = sniff_mime(&bytes).unwrap_or_else(|| mime_from_extension(path));
    Ok(encode_bytes(&bytes, mime))
}

/// Encode raw bytes with the given MIME type.
#[must_use]
pub fn encode_bytes(bytes: &[u8], mime: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

/// Summary of an encoded photo, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoInfo {
    pub mime: String,
    pub size_bytes: usize,
}

impl PhotoInfo {
    /// Parse the header of a data URL and compute the decoded payload size.
    ///
    /// # Errors
    /// Returns `EncodingError::MalformedDataUrl` if the text is not a base64
    /// data URL.
    pub fn from_data_url(data_url: &str) -> Result<Self, EncodingError> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| EncodingError::MalformedDataUrl("missing data: prefix".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| EncodingError::MalformedDataUrl("missing payload".into()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| EncodingError::MalformedDataUrl("not base64 encoded".into()))?;

        let padding = payload.bytes().rev().take_while(|&b| b == b'=').count();
        let size_bytes = (payload.len() / 4 * 3).saturating_sub(padding);

        Ok(Self {
            mime: if mime.is_empty() { OCTET_STREAM } else { mime }.to_string(),
            size_bytes,
        })
    }

    /// Human-readable size, e.g. `12.4 KiB`.
    #[must_use]
    pub fn size_label(&self) -> String {
        const KIB: f64 = 1024.0;
        let size = self.size_bytes as f64;
        if size < KIB {
            format!("{} B", self.size_bytes)
        } else if size < KIB * KIB {
            format!("{:.1} KiB", size / KIB)
        } else {
            format!("{:.1} MiB", size / (KIB * KIB))
        }
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: [(&[u8], &str); 5] = [
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xFF\xD8\xFF", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"BM", "image/bmp"),
    ];

    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    SIGNATURES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|(_, mime)| *mime)
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => OCTET_STREAM,
    }
}
