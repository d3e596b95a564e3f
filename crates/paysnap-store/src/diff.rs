//! Memoized snapshot diffing.
//!
//! Wraps the pure diff engine with the memo table: a diff for an ordered
//! snapshot pair is computed once and retrieved thereafter. Memo writes
//! use INSERT OR IGNORE, so a duplicate concurrent computation is
//! wasteful but safe.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::snapshot::query::fetch_employees;
use paysnap_core::diff::{compute_diff, SnapshotDiff};
use paysnap_core::errors::DomainError;
use rusqlite::{Connection, OptionalExtension};

/// Compute or retrieve the diff between two snapshots.
///
/// The memo key is the exact ordered pair: `(from, to)` and `(to, from)`
/// are distinct entries, because the diff is directional.
///
/// # Errors
///
/// Returns `NotFound` when either snapshot id does not exist, and a
/// `Serialization` error when a stored blob (or memo row) is corrupt.
pub fn calculate_diff(
    conn: &Connection,
    from_snapshot_id: i64,
    to_snapshot_id: i64,
) -> Result<SnapshotDiff> {
    // Memo lookup first
    let cached: Option<String> = conn
        .query_row(
            "SELECT diff_json FROM payroll_snapshot_diffs
             WHERE from_snapshot_id = ?1 AND to_snapshot_id = ?2",
            [from_snapshot_id, to_snapshot_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(diff_json) = cached {
        tracing::debug!(
            from_snapshot_id = from_snapshot_id,
            to_snapshot_id = to_snapshot_id,
            "Returning memoized snapshot diff"
        );
        let diff = serde_json::from_str(&diff_json).map_err(|e| DomainError::Serialization {
            message: format!(
                "Memoized diff for ({}, {}) is corrupt: {}",
                from_snapshot_id, to_snapshot_id, e
            ),
        })?;
        return Ok(diff);
    }

    let from_employees = fetch_employees(conn, from_snapshot_id)?;
    let to_employees = fetch_employees(conn, to_snapshot_id)?;

    let diff = compute_diff(&from_employees, &to_employees);

    store_diff(conn, from_snapshot_id, to_snapshot_id, &diff)?;

    Ok(diff)
}

/// Persist a computed diff for future reuse.
fn store_diff(
    conn: &Connection,
    from_snapshot_id: i64,
    to_snapshot_id: i64,
    diff: &SnapshotDiff,
) -> Result<()> {
    let diff_json = serde_json::to_string(diff)?;
    let computed_at = chrono::Utc::now().timestamp_millis();

    conn.execute(
        "INSERT OR IGNORE INTO payroll_snapshot_diffs (
            from_snapshot_id, to_snapshot_id,
            employees_changed, total_pay_delta, diff_json,
            additions_count, modifications_count, deletions_count,
            computed_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            from_snapshot_id,
            to_snapshot_id,
            diff.employees_changed.len() as i64,
            diff.total_pay_delta,
            diff_json,
            diff.summary.additions_count as i64,
            diff.summary.modifications_count as i64,
            diff.summary.deletions_count as i64,
            computed_at,
        ],
    )
    .map_err(from_rusqlite)?;

    tracing::debug!(
        from_snapshot_id = from_snapshot_id,
        to_snapshot_id = to_snapshot_id,
        additions = diff.summary.additions_count,
        modifications = diff.summary.modifications_count,
        deletions = diff.summary.deletions_count,
        "Memoized snapshot diff"
    );

    Ok(())
}
