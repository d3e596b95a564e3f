//! Canonical snapshot domain serialization and content hashing.
//!
//! A snapshot holds one opaque serialized blob per upstream domain. The
//! blobs are hashed together in a fixed order; that order is part of the
//! storage contract and must never change.

pub mod digest;
pub mod domains;

pub use digest::content_hash;
pub use domains::{DomainBlobs, DomainPayload, HASH_DOMAIN_ORDER};
