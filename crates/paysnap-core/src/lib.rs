//! Paysnap Core - Domain layer for payroll state snapshots
//!
//! This crate provides the pure (no I/O) half of the snapshot engine:
//! - Loosely-typed employee records with defaulted optional fields
//! - Canonical domain-blob serialization and SHA-256 content hashing
//! - Structured diff computation between two snapshot states
//! - Provider payslip adapter with one interface per line category
//! - Canonical error facility and logging initialization
//!
//! Persistence (runs, revisions, snapshot rows, the diff memo table and
//! the amendment ledger) lives in `paysnap-store`.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod payslip;
pub mod snapshot;

// Re-export commonly used types
pub use errors::{DomainError, PayError, PayErrorKind, Result};
pub use model::{
    ActorContext, ApprovalStatus, ConfigSnapshot, EmployeeRecord, RunStatus, SnapshotType,
};
pub use snapshot::{DomainBlobs, DomainPayload};
