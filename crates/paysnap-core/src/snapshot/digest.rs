//! Digest computation for snapshot domain blobs.
//!
//! Provides the deterministic SHA-256 content hash used both at capture
//! time and by the integrity verifier. The two must stay byte-identical:
//! verification recomputes the hash from stored blobs with this exact
//! function and compares it against the stored value.
//!
//! ## Determinism Guarantees
//!
//! - Same blobs → same hash (canonical JSON serialization upstream)
//! - Domain order is fixed (`HASH_DOMAIN_ORDER`); absent domains hash as ""
//! - The `|` separator between domains is part of the contract

use crate::snapshot::domains::DomainBlobs;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 content hash of a snapshot's domain blobs.
///
/// Concatenates the blobs in the fixed domain order, joined by `|`, and
/// hashes the result. Returns a hex-encoded digest (64 characters).
pub fn content_hash(blobs: &DomainBlobs) -> String {
    hash_string(&blobs.ordered().join("|"))
}

/// Hash a string using SHA256.
///
/// Internal helper for deterministic digest computation.
fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
