//! Encoding Utilities

use base64::{Engine, engine::general_purpose};

/// Encode bytes as URL-safe base64 without padding (cookie-value safe)
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode URL-safe base64 without padding
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s)
}
