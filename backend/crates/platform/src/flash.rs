//! Flash Messages
//!
//! A flash is a one-shot message set on a redirect and shown by the next
//! page. It travels in a cookie as base64url of `level:message`.

use axum::http::HeaderMap;
use thiserror::Error;

use crate::cookie::extract_cookie;
use crate::crypto::{from_base64, to_base64};

/// Severity of a flash message, named after the CSS alert classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Info,
}

impl FlashLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "success" => Some(Self::Success),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum FlashError {
    #[error("flash cookie is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("flash cookie is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("flash cookie is malformed")]
    Format,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message)
    }

    /// Encode as a cookie-safe value
    pub fn encode(&self) -> String {
        to_base64(format!("{}:{}", self.level.as_str(), self.message).as_bytes())
    }

    pub fn decode(value: &str) -> Result<Self, FlashError> {
        let text = String::from_utf8(from_base64(value)?)?;
        let (level, message) = text.split_once(':').ok_or(FlashError::Format)?;
        let level = FlashLevel::from_code(level).ok_or(FlashError::Format)?;
        Ok(Self::new(level, message))
    }

    /// Read the flash cookie from a request, if present and well-formed
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<Self> {
        let raw = extract_cookie(headers, cookie_name)?;
        if raw.is_empty() {
            return None;
        }
        Self::decode(&raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    #[test]
    fn test_decode_encoded_flash() {
        let flash = Flash::success("Car added: Civic; reg AB-12");
        assert_eq!(Flash::decode(&flash.encode()).unwrap(), flash);
    }

    #[test]
    fn test_decode_rejects_unknown_level() {
        let raw = to_base64(b"shout:hello");
        assert!(matches!(Flash::decode(&raw), Err(FlashError::Format)));
    }

    #[test]
    fn test_decode_rejects_missing_separator() {
        let raw = to_base64(b"success");
        assert!(matches!(Flash::decode(&raw), Err(FlashError::Format)));
    }

    #[test]
    fn test_from_headers() {
        let flash = Flash::info("Customer deleted.");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("flash={}", flash.encode())).unwrap(),
        );

        assert_eq!(Flash::from_headers(&headers, "flash"), Some(flash));
        assert_eq!(Flash::from_headers(&headers, "other"), None);
    }

    #[test]
    fn test_from_headers_ignores_cleared_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("flash="));
        assert_eq!(Flash::from_headers(&headers, "flash"), None);
    }
}
