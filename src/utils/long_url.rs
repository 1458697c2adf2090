//! Long URL validation.
//!
//! The core hashes the long URL exactly as submitted, so validation checks
//! shape without rewriting the input.

use url::Url;

/// Errors that can occur while validating a long URL.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LongUrlError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates that `input` is an absolute HTTP(S) URL with a host.
///
/// Returns the input with surrounding whitespace removed.
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
///
/// # Errors
///
/// Returns [`LongUrlError::Empty`] for blank input.
/// Returns [`LongUrlError::InvalidFormat`] for relative or malformed URLs,
/// including any with interior whitespace or control characters.
/// Returns [`LongUrlError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn validate_long_url(input: &str) -> Result<&str, LongUrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LongUrlError::Empty);
    }

    // The parser silently drops tabs and newlines, but they can never go
    // into a Location header.
    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(LongUrlError::InvalidFormat(
            "URL must not contain whitespace or control characters".to_string(),
        ));
    }

    let url = Url::parse(trimmed).map_err(|e| LongUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(LongUrlError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(LongUrlError::MissingHost);
    }

    Ok(trimmed)
}
