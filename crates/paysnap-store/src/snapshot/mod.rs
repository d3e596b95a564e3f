//! Snapshot persistence.
//!
//! Provides:
//! - Capture: hash and persist the full domain state for a run
//! - Projection: normalized employee details and child line items
//! - Query: row fetches and typed domain decoding
//! - Verify: content-hash integrity checks

pub mod capture;
pub mod details;
pub mod project;
pub mod query;
pub mod verify;

pub use capture::{capture_snapshot, CaptureRequest};
pub use details::{list_employee_details, EmployeeDetailRow};
pub use query::{load_snapshot_domains, SnapshotDomains, SnapshotRow};
pub use verify::{verify_run, verify_snapshot, RunVerification, VerificationResult};
