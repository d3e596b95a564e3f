//! Structured diff computation between two snapshot states.

pub mod engine;
pub mod model;

pub use engine::{compute_diff, COMPARED_FIELDS, FIELD_CHANGE_THRESHOLD};
pub use model::{DiffSummary, EmployeeDelta, EmployeeModification, FieldChange, SnapshotDiff};
