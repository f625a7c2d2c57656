//! URL validation ahead of encoding

use crate::error::{Error, Result};
use url::Url;

/// Schemes accepted for encoding.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

/// Parse `input` and check it has a recognized scheme and a host.
pub fn parse_url(input: &str) -> Result<Url> {
    let parsed = Url::parse(input.trim()).map_err(|_| Error::InvalidUrl(input.to_string()))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(Error::InvalidUrl(input.to_string()));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(Error::InvalidUrl(input.to_string())),
    }
}

/// Returns whether `input` is a URL worth encoding, logging the rejection otherwise.
pub fn is_valid_url(input: &str) -> bool {
    match parse_url(input) {
        Ok(_) => true,
        Err(_) => {
            tracing::error!("Invalid URL provided: {input}");
            false
        }
    }
}
