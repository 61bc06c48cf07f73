//! Content hashing for file attestations.

use crate::entities::Hash;
use sha3::{Digest, Keccak256};

/// Computes keccak256 of raw bytes.
///
/// Clients hash an uploaded document locally with this function and submit
/// only the digest; the registry never sees file contents.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let hash = Keccak256::digest(data);
    Hash::new(hash.into())
}
