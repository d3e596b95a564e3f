//! Diff result model.
//!
//! The diff is directional: it is framed from the `to` snapshot's
//! perspective. Employees present only in `to` are additions, employees
//! present only in `from` are deletions, and the modification list takes
//! names from the `to` side. Reversing the arguments does not produce the
//! algebraic negation of the per-field structure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured delta between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    pub additions: Vec<EmployeeDelta>,
    pub modifications: Vec<EmployeeModification>,
    pub deletions: Vec<EmployeeDelta>,

    /// User ids with at least one modified compared field
    pub employees_changed: Vec<i64>,

    /// Net gross-earnings movement across additions, deletions, and
    /// gross-earnings modifications
    pub total_pay_delta: f64,

    pub summary: DiffSummary,
}

/// An employee present on only one side of the diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDelta {
    pub user_id: i64,
    pub name: String,
    pub gross_earnings: f64,
}

/// An employee present on both sides with at least one changed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeModification {
    pub user_id: i64,
    pub name: String,
    /// Changed fields keyed by field name, key-ordered for determinism
    pub changes: BTreeMap<String, FieldChange>,
}

/// Before/after values for a single compared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub from: f64,
    pub to: f64,
    pub delta: f64,
}

/// Aggregate counters over the diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub additions_count: usize,
    pub modifications_count: usize,
    pub deletions_count: usize,
    /// Distinct employees with modified fields
    pub employees_affected: usize,
    /// Rounded to 2 decimal places
    pub total_pay_delta: f64,
}
