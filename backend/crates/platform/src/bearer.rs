//! Bearer Token Extraction
//!
//! Reads `Authorization: Bearer <token>` from request headers.

use http::{HeaderMap, header};
use thiserror::Error;

/// Authorization scheme accepted by [`parse_bearer`]
pub const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("missing authorization header")]
    Missing,

    #[error("malformed authorization header")]
    Malformed,
}

/// Extract the bearer token from the `Authorization` header
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    parse_bearer(value)
}

/// Parse `"Bearer <token>"`
///
/// The scheme is matched exactly and the token must be non-empty.
pub fn parse_bearer(value: &str) -> Result<&str, BearerError> {
    let (scheme, token) = value.split_once(' ').ok_or(BearerError::Malformed)?;

    if scheme != BEARER_SCHEME || token.is_empty() {
        return Err(BearerError::Malformed);
    }

    Ok(token)
}
