//! Data URI entity
//!
//! Uploaded files travel as `data:<mime>;base64,<payload>` strings, the
//! format browsers produce with `FileReader::readAsDataURL`.

use crate::core::DataUriError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use std::fmt;
use std::str::FromStr;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";
const FALLBACK_MIME: &str = "application/octet-stream";

/// A parsed base64 data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    payload: String,
}

impl DataUri {
    /// Builds a data URI from raw bytes
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        let mime_type = if mime_type.trim().is_empty() {
            FALLBACK_MIME.to_string()
        } else {
            mime_type.trim().to_string()
        };
        Self {
            mime_type,
            payload: B64.encode(bytes),
        }
    }

    /// Builds a data URI for a file name, guessing the MIME type from its extension
    pub fn for_file(file_name: &str, bytes: &[u8]) -> Self {
        Self::from_bytes(guess_mime_type(file_name), bytes)
    }

    /// Returns the MIME type (never empty)
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the base64 payload as-is
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Decodes the payload bytes
    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        B64.decode(self.payload.trim())
            .map_err(|e| DataUriError::InvalidBase64(e.to_string()))
    }

    /// Decodes the payload as text, replacing invalid UTF-8 sequences
    pub fn decode_text(&self) -> Result<String, DataUriError> {
        let bytes = self.decode()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Returns whether the payload carries no bytes
    pub fn is_empty(&self) -> bool {
        self.payload.trim().is_empty()
    }
}

impl FromStr for DataUri {
    type Err = DataUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DataUriError::Empty);
        }
        let rest = s
            .get(..SCHEME.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(SCHEME))
            .map(|_| &s[SCHEME.len()..])
            .ok_or(DataUriError::MissingScheme)?;
        let marker = rest
            .find(BASE64_MARKER)
            .ok_or(DataUriError::MissingBase64Marker)?;

        let mime_type = rest[..marker].trim();
        let payload = &rest[marker + BASE64_MARKER.len()..];
        B64.decode(payload.trim())
            .map_err(|e| DataUriError::InvalidBase64(e.to_string()))?;

        Ok(Self {
            mime_type: if mime_type.is_empty() {
                FALLBACK_MIME.to_string()
            } else {
                mime_type.to_string()
            },
            payload: payload.trim().to_string(),
        })
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}{BASE64_MARKER}{}", self.mime_type, self.payload)
    }
}

/// Guesses a MIME type from a file name extension
pub fn guess_mime_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => FALLBACK_MIME,
    }
}
