//! Manual-amendment ledger.
//!
//! Records field-level adjustments requested against a run, each subject
//! to an approval workflow: pending on creation, then approved or
//! rejected, both terminal. Approved amendments are not applied to any
//! snapshot here; that integration belongs to the caller.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::runs::require_run;
use paysnap_core::errors::DomainError;
use paysnap_core::model::ApprovalStatus;
use rusqlite::{Connection, OptionalExtension};

/// Input for recording one amendment.
#[derive(Debug, Clone)]
pub struct AmendmentInput<'a> {
    pub run_id: i64,
    pub employee_detail_id: Option<i64>,
    pub amendment_type: &'a str,
    pub field_name: &'a str,
    pub old_value: f64,
    pub new_value: f64,
    pub reason: &'a str,
    pub requested_by: Option<i64>,
}

/// A row from the `payroll_amendments` table.
#[derive(Debug, Clone)]
pub struct AmendmentRow {
    pub amendment_id: i64,
    pub run_id: i64,
    pub employee_detail_id: Option<i64>,
    pub amendment_type: String,
    pub field_name: String,
    pub old_value: f64,
    pub new_value: f64,
    pub delta: f64,
    pub reason: String,
    pub requested_by: Option<i64>,
    pub requested_at: i64,
    pub approval_status: ApprovalStatus,
    pub resolved_by: Option<i64>,
    pub resolved_at: Option<i64>,
}

/// Record an amendment in `pending` status, returning its id.
///
/// The delta is computed here as `new_value - old_value`.
pub fn create_amendment(conn: &Connection, input: &AmendmentInput<'_>) -> Result<i64> {
    require_run(conn, input.run_id)?;

    let delta = input.new_value - input.old_value;
    let requested_at = chrono::Utc::now().timestamp_millis();

    conn.execute(
        "INSERT INTO payroll_amendments (
            run_id, employee_detail_id, amendment_type, field_name,
            old_value, new_value, delta, reason, requested_by,
            requested_at, approval_status
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        rusqlite::params![
            input.run_id,
            input.employee_detail_id,
            input.amendment_type,
            input.field_name,
            input.old_value,
            input.new_value,
            delta,
            input.reason,
            input.requested_by,
            requested_at,
            ApprovalStatus::Pending.as_str(),
        ],
    )
    .map_err(from_rusqlite)?;

    let amendment_id = conn.last_insert_rowid();

    tracing::info!(
        run_id = input.run_id,
        amendment_id = amendment_id,
        field = input.field_name,
        delta = delta,
        "Created amendment"
    );

    Ok(amendment_id)
}

/// Approve a pending amendment. Terminal.
pub fn approve_amendment(conn: &Connection, amendment_id: i64, resolver: Option<i64>) -> Result<()> {
    resolve_amendment(conn, amendment_id, ApprovalStatus::Approved, resolver)
}

/// Reject a pending amendment. Terminal.
pub fn reject_amendment(conn: &Connection, amendment_id: i64, resolver: Option<i64>) -> Result<()> {
    resolve_amendment(conn, amendment_id, ApprovalStatus::Rejected, resolver)
}

fn resolve_amendment(
    conn: &Connection,
    amendment_id: i64,
    status: ApprovalStatus,
    resolver: Option<i64>,
) -> Result<()> {
    let resolved_at = chrono::Utc::now().timestamp_millis();

    // Guard on pending so terminal states cannot be overwritten
    let affected = conn
        .execute(
            "UPDATE payroll_amendments
             SET approval_status = ?1, resolved_by = ?2, resolved_at = ?3
             WHERE id = ?4 AND approval_status = ?5",
            rusqlite::params![
                status.as_str(),
                resolver,
                resolved_at,
                amendment_id,
                ApprovalStatus::Pending.as_str(),
            ],
        )
        .map_err(from_rusqlite)?;

    if affected == 0 {
        let current: Option<String> = conn
            .query_row(
                "SELECT approval_status FROM payroll_amendments WHERE id = ?1",
                [amendment_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;

        return Err(match current {
            None => DomainError::AmendmentNotFound { amendment_id }.into(),
            Some(status) => DomainError::AmendmentAlreadyResolved {
                amendment_id,
                status,
            }
            .into(),
        });
    }

    tracing::info!(
        amendment_id = amendment_id,
        status = status.as_str(),
        "Resolved amendment"
    );

    Ok(())
}

/// Fetch an amendment row by id.
pub fn fetch_amendment(conn: &Connection, amendment_id: i64) -> Result<AmendmentRow> {
    let row = conn
        .query_row(
            "SELECT id, run_id, employee_detail_id, amendment_type, field_name,
                    old_value, new_value, delta, reason, requested_by,
                    requested_at, approval_status, resolved_by, resolved_at
             FROM payroll_amendments WHERE id = ?1",
            [amendment_id],
            row_to_amendment,
        )
        .optional()
        .map_err(from_rusqlite)?;

    match row {
        Some(row) => Ok(finish_row(row)?),
        None => Err(DomainError::AmendmentNotFound { amendment_id }.into()),
    }
}

/// List all amendments for a run in creation order.
pub fn list_amendments_for_run(conn: &Connection, run_id: i64) -> Result<Vec<AmendmentRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, run_id, employee_detail_id, amendment_type, field_name,
                    old_value, new_value, delta, reason, requested_by,
                    requested_at, approval_status, resolved_by, resolved_at
             FROM payroll_amendments
             WHERE run_id = ?1
             ORDER BY id",
        )
        .map_err(from_rusqlite)?;
    let raw: std::result::Result<Vec<_>, _> = stmt
        .query_map([run_id], row_to_amendment)
        .map_err(from_rusqlite)?
        .collect();

    raw.map_err(from_rusqlite)?
        .into_iter()
        .map(finish_row)
        .collect()
}

type RawAmendment = (
    i64,
    i64,
    Option<i64>,
    String,
    String,
    f64,
    f64,
    f64,
    String,
    Option<i64>,
    i64,
    String,
    Option<i64>,
    Option<i64>,
);

fn row_to_amendment(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawAmendment> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
        row.get(10)?,
        row.get(11)?,
        row.get(12)?,
        row.get(13)?,
    ))
}

fn finish_row(raw: RawAmendment) -> Result<AmendmentRow> {
    Ok(AmendmentRow {
        amendment_id: raw.0,
        run_id: raw.1,
        employee_detail_id: raw.2,
        amendment_type: raw.3,
        field_name: raw.4,
        old_value: raw.5,
        new_value: raw.6,
        delta: raw.7,
        reason: raw.8,
        requested_by: raw.9,
        requested_at: raw.10,
        approval_status: ApprovalStatus::parse(&raw.11)?,
        resolved_by: raw.12,
        resolved_at: raw.13,
    })
}
