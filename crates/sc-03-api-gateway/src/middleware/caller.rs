//! Caller identity for mutating calls.
//!
//! The signing provider in front of the gateway verifies the sender and
//! forwards its address in a header. The gateway trusts that header as-is.

use crate::domain::error::ApiError;
use axum::http::HeaderMap;
use shared_types::Address;

/// Header carrying the verified caller address.
pub const CALLER_HEADER: &str = "x-skillchain-caller";

/// Read the caller header.
///
/// `Ok(None)` when absent; an error when present but not a valid address.
pub fn caller_from_headers(headers: &HeaderMap) -> Result<Option<Address>, ApiError> {
    let Some(raw) = headers.get(CALLER_HEADER) else {
        return Ok(None);
    };
    let text = raw
        .to_str()
        .map_err(|_| ApiError::unauthorized("caller header is not valid text"))?;
    text.trim()
        .parse::<Address>()
        .map(Some)
        .map_err(|e| ApiError::unauthorized(format!("malformed caller address: {e}")))
}
