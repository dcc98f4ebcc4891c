//! Threat-detection link
//!
//! Extracted data is handed to the threat-detection page through the
//! `extractedData` query parameter, percent-encoded the way browsers'
//! `encodeURIComponent` does it.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use thiserror::Error;

/// Route of the threat-detection page
pub const THREAT_DETECTION_ROUTE: &str = "/threat-detection";

/// Query parameter carrying the extracted data
pub const EXTRACTED_DATA_PARAM: &str = "extractedData";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("extracted data is not valid percent-encoded UTF-8: {0}")]
pub struct LinkDecodeError(String);

/// Percent-encodes `text` as a URI component
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Reverses [`encode_component`]
///
/// Fails when the escapes do not form valid UTF-8.
pub fn decode_component(encoded: &str) -> Result<String, LinkDecodeError> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|text| text.into_owned())
        .map_err(|e| LinkDecodeError(e.to_string()))
}

/// Builds the threat-detection link pre-filled with `extracted_data`
pub fn threat_detection_link(extracted_data: &str) -> String {
    format!(
        "{THREAT_DETECTION_ROUTE}?{EXTRACTED_DATA_PARAM}={}",
        encode_component(extracted_data)
    )
}
