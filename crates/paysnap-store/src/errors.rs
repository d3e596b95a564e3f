//! Error handling for paysnap-store
//!
//! Wraps paysnap-core PayError with store-specific helpers

use paysnap_core::errors::{PayError, PayErrorKind};

/// Result type alias using PayError
pub type Result<T> = std::result::Result<T, PayError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> PayError {
    PayError::new(PayErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> PayError {
    PayError::new(PayErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> PayError {
    PayError::new(PayErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}
