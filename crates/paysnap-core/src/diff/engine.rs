//! Snapshot diff computation engine.
//!
//! The entry point is [`compute_diff`], which accepts the decoded
//! employee domains of two snapshots and produces a [`SnapshotDiff`].
//! Persistence and memoization live in the store crate; this module is
//! pure.

use crate::diff::model::{
    DiffSummary, EmployeeDelta, EmployeeModification, FieldChange, SnapshotDiff,
};
use crate::model::EmployeeRecord;
use std::collections::BTreeMap;

/// Numeric fields compared for employees present on both sides.
///
/// The whitelist is fixed; fields outside it never produce a
/// modification entry. Keys match the employee record's serialized
/// field names.
pub const COMPARED_FIELDS: &[&str] = &[
    "totalHours",
    "grossEarnings",
    "netPay",
    "commission",
    "monthlyBonus",
    "googleReviewBonus",
    "vapeDropsBonus",
    "accountPaymentDeduction",
];

/// A field counts as changed only when the absolute delta exceeds this
/// threshold, tolerating floating-point noise in upstream calculations.
pub const FIELD_CHANGE_THRESHOLD: f64 = 0.01;

fn field_value(employee: &EmployeeRecord, field: &str) -> f64 {
    match field {
        "totalHours" => employee.total_hours,
        "grossEarnings" => employee.gross_earnings,
        "netPay" => employee.net_pay,
        "commission" => employee.commission,
        "monthlyBonus" => employee.monthly_bonus,
        "googleReviewBonus" => employee.google_review_bonus,
        "vapeDropsBonus" => employee.vape_drops_bonus,
        "accountPaymentDeduction" => employee.account_payment_deduction,
        _ => 0.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute a structured, deterministic diff between two employee sets.
///
/// Employees are indexed by `user_id`. Output ordering is by user id on
/// every list, so identical inputs always produce an identical diff.
pub fn compute_diff(from: &[EmployeeRecord], to: &[EmployeeRecord]) -> SnapshotDiff {
    let from_index: BTreeMap<i64, &EmployeeRecord> =
        from.iter().map(|e| (e.user_id, e)).collect();
    let to_index: BTreeMap<i64, &EmployeeRecord> = to.iter().map(|e| (e.user_id, e)).collect();

    let mut additions: Vec<EmployeeDelta> = Vec::new();
    let mut modifications: Vec<EmployeeModification> = Vec::new();
    let mut deletions: Vec<EmployeeDelta> = Vec::new();
    let mut employees_changed: Vec<i64> = Vec::new();
    let mut total_pay_delta = 0.0;

    // Additions: present in `to` only; full gross earnings enters the delta
    for (user_id, employee) in &to_index {
        if !from_index.contains_key(user_id) {
            additions.push(EmployeeDelta {
                user_id: *user_id,
                name: employee.name.clone(),
                gross_earnings: employee.gross_earnings,
            });
            total_pay_delta += employee.gross_earnings;
        }
    }

    // Modifications: present on both sides, compared over the whitelist
    for (user_id, to_employee) in &to_index {
        let Some(from_employee) = from_index.get(user_id) else {
            continue;
        };

        let mut changes: BTreeMap<String, FieldChange> = BTreeMap::new();
        for field in COMPARED_FIELDS {
            let from_val = field_value(from_employee, field);
            let to_val = field_value(to_employee, field);

            if (from_val - to_val).abs() > FIELD_CHANGE_THRESHOLD {
                changes.insert(
                    (*field).to_string(),
                    FieldChange {
                        from: from_val,
                        to: to_val,
                        delta: to_val - from_val,
                    },
                );

                if *field == "grossEarnings" {
                    total_pay_delta += to_val - from_val;
                }
            }
        }

        if !changes.is_empty() {
            modifications.push(EmployeeModification {
                user_id: *user_id,
                name: to_employee.name.clone(),
                changes,
            });
            employees_changed.push(*user_id);
        }
    }

    // Deletions: present in `from` only; full gross earnings leaves the delta
    for (user_id, employee) in &from_index {
        if !to_index.contains_key(user_id) {
            deletions.push(EmployeeDelta {
                user_id: *user_id,
                name: employee.name.clone(),
                gross_earnings: employee.gross_earnings,
            });
            total_pay_delta -= employee.gross_earnings;
        }
    }

    let summary = DiffSummary {
        additions_count: additions.len(),
        modifications_count: modifications.len(),
        deletions_count: deletions.len(),
        employees_affected: employees_changed.len(),
        total_pay_delta: round2(total_pay_delta),
    };

    tracing::debug!(
        additions = summary.additions_count,
        modifications = summary.modifications_count,
        deletions = summary.deletions_count,
        total_pay_delta = summary.total_pay_delta,
        "Computed snapshot diff"
    );

    SnapshotDiff {
        additions,
        modifications,
        deletions,
        employees_changed,
        total_pay_delta,
        summary,
    }
}
