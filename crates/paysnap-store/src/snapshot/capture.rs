//! Snapshot capture.
//!
//! Serializes the full state universe handed in by the caller, hashes it
//! in the fixed domain order, persists the snapshot row, back-links the
//! originating revision, and materializes the employee projection. All
//! of it commits in one transaction.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::runs::require_run;
use crate::snapshot::project;
use paysnap_core::errors::DomainError;
use paysnap_core::model::{ConfigSnapshot, EmployeeRecord, SnapshotType};
use paysnap_core::payslip::PayslipFlat;
use paysnap_core::snapshot::{DomainBlobs, DomainPayload};
use rusqlite::Connection;
use serde_json::Value;

/// Everything a caller supplies for one capture.
///
/// Employee records and flattened payslips are typed; the remaining
/// domains are opaque upstream API responses. Provider SDK payslips must
/// go through `paysnap_core::payslip::adapt_payslips` first — raw SDK
/// objects never reach this boundary.
#[derive(Debug, Clone)]
pub struct CaptureRequest<'a> {
    pub run_id: i64,
    pub revision_id: Option<i64>,
    pub snapshot_type: SnapshotType,
    pub employees: &'a [EmployeeRecord],
    pub deputy_timesheets: Option<&'a Value>,
    pub vend_balances: Option<&'a Value>,
    pub payslips: Option<&'a [PayslipFlat]>,
    pub external_employees: Option<&'a Value>,
    pub public_holidays: Option<&'a Value>,
    pub bonus_calculations: Option<&'a Value>,
    pub amendments: Option<&'a Value>,
    pub config: &'a ConfigSnapshot,
}

/// Capture a complete snapshot for a run, returning the snapshot id.
///
/// Side effects: exactly one snapshot row, one employee-detail row per
/// employee record, child line rows per present line item, and payslip
/// line rows for every linkable flattened payslip.
pub fn capture_snapshot(conn: &mut Connection, request: &CaptureRequest<'_>) -> Result<i64> {
    require_run(conn, request.run_id)?;

    let blobs = DomainBlobs::encode(&DomainPayload {
        employees: request.employees,
        deputy_timesheets: request.deputy_timesheets,
        vend_balances: request.vend_balances,
        payslips: request.payslips,
        external_employees: request.external_employees,
        public_holidays: request.public_holidays,
        bonus_calculations: request.bonus_calculations,
        amendments: request.amendments,
        config: request.config,
    })?;

    let content_hash = blobs.content_hash();
    let total_size_bytes = blobs.total_size_bytes();
    let captured_at = chrono::Utc::now().timestamp_millis();

    let tx = conn.transaction().map_err(from_rusqlite)?;

    tx.execute(
        "INSERT INTO payroll_snapshots (
            run_id, revision_id, snapshot_type, captured_at,
            employees_json, deputy_timesheets_json, vend_balances_json,
            payslips_json, external_employees_json, public_holidays_json,
            bonus_calculations_json, amendments_json, config_json,
            content_hash, employee_count, total_size_bytes
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        rusqlite::params![
            request.run_id,
            request.revision_id,
            request.snapshot_type.as_str(),
            captured_at,
            blobs.employees,
            blobs.deputy_timesheets,
            blobs.vend_balances,
            blobs.payslips,
            blobs.external_employees,
            blobs.public_holidays,
            blobs.bonus_calculations,
            blobs.amendments,
            blobs.config,
            content_hash,
            request.employees.len() as i64,
            total_size_bytes,
        ],
    )
    .map_err(from_rusqlite)?;

    let snapshot_id = tx.last_insert_rowid();

    // Back-link the originating revision
    if let Some(revision_id) = request.revision_id {
        let affected = tx
            .execute(
                "UPDATE payroll_revisions SET snapshot_id = ?1 WHERE id = ?2",
                rusqlite::params![snapshot_id, revision_id],
            )
            .map_err(from_rusqlite)?;
        if affected == 0 {
            return Err(DomainError::RevisionNotFound { revision_id }.into());
        }
    }

    project::store_employee_details(&tx, request.run_id, snapshot_id, request.employees)?;

    if let Some(payslips) = request.payslips {
        project::store_payslip_lines(&tx, request.run_id, snapshot_id, payslips)?;
    }

    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(
        run_id = request.run_id,
        snapshot_id = snapshot_id,
        snapshot_type = request.snapshot_type.as_str(),
        employees = request.employees.len(),
        size_bytes = total_size_bytes,
        hash_prefix = &content_hash[..12],
        "Captured snapshot"
    );

    Ok(snapshot_id)
}
