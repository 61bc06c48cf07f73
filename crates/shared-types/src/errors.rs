//! # Error Types
//!
//! Parse errors for the textual forms of shared primitives.

use thiserror::Error;

/// Errors raised when decoding addresses, hashes or domain markers from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input is not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte length does not match the fixed-size type.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Text is not one of the known domain markers.
    #[error("Unknown domain: {0}")]
    UnknownDomain(String),
}

impl From<hex::FromHexError> for ParseError {
    fn from(e: hex::FromHexError) -> Self {
        ParseError::InvalidHex(e.to_string())
    }
}
