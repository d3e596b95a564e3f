//! Read-only snapshot query operations.
//!
//! Row fetches for the snapshot ledger plus typed decoding of the stored
//! domain blobs. Decoding a corrupt blob is an error, never an empty
//! default.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use paysnap_core::errors::DomainError;
use paysnap_core::model::EmployeeRecord;
use paysnap_core::payslip::PayslipFlat;
use paysnap_core::snapshot::DomainBlobs;
use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;

/// A row from the `payroll_snapshots` ledger (metadata only, no blobs).
#[derive(Debug, Clone)]
pub struct SnapshotRow {
    pub snapshot_id: i64,
    pub run_id: i64,
    pub revision_id: Option<i64>,
    pub snapshot_type: String,
    pub captured_at: i64,
    pub content_hash: String,
    pub employee_count: i64,
    pub total_size_bytes: i64,
}

/// Decoded snapshot domains, typed at the boundary.
///
/// Employees and payslips decode into their record types; the remaining
/// domains stay opaque JSON the engine only carries, never interprets.
/// Absent domains decode to empty collections.
#[derive(Debug, Clone)]
pub struct SnapshotDomains {
    pub employees: Vec<EmployeeRecord>,
    pub deputy_timesheets: Value,
    pub vend_balances: Value,
    pub payslips: Vec<PayslipFlat>,
    pub public_holidays: Value,
    pub bonus_calculations: Value,
}

/// Fetch a snapshot's ledger row by id.
pub fn fetch_snapshot_row(conn: &Connection, snapshot_id: i64) -> Result<SnapshotRow> {
    conn.query_row(
        "SELECT id, run_id, revision_id, snapshot_type, captured_at,
                content_hash, employee_count, total_size_bytes
         FROM payroll_snapshots WHERE id = ?1",
        [snapshot_id],
        row_to_snapshot_row,
    )
    .optional()
    .map_err(from_rusqlite)?
    .ok_or_else(|| DomainError::SnapshotNotFound { snapshot_id }.into())
}

/// Fetch the raw stored domain blobs for a snapshot.
///
/// Used by the integrity verifier to recompute the content hash with the
/// exact bytes that were stored.
pub fn fetch_domain_blobs(conn: &Connection, snapshot_id: i64) -> Result<DomainBlobs> {
    conn.query_row(
        "SELECT employees_json, deputy_timesheets_json, vend_balances_json,
                payslips_json, external_employees_json, public_holidays_json,
                bonus_calculations_json, amendments_json, config_json
         FROM payroll_snapshots WHERE id = ?1",
        [snapshot_id],
        |row| {
            Ok(DomainBlobs {
                employees: row.get(0)?,
                deputy_timesheets: row.get(1)?,
                vend_balances: row.get(2)?,
                payslips: row.get(3)?,
                external_employees: row.get(4)?,
                public_holidays: row.get(5)?,
                bonus_calculations: row.get(6)?,
                amendments: row.get(7)?,
                config: row.get(8)?,
            })
        },
    )
    .optional()
    .map_err(from_rusqlite)?
    .ok_or_else(|| DomainError::SnapshotNotFound { snapshot_id }.into())
}

/// Fetch and decode only the employee domain of a snapshot.
pub fn fetch_employees(conn: &Connection, snapshot_id: i64) -> Result<Vec<EmployeeRecord>> {
    let blob: Option<String> = conn
        .query_row(
            "SELECT employees_json FROM payroll_snapshots WHERE id = ?1",
            [snapshot_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    let Some(blob) = blob else {
        return Err(DomainError::SnapshotNotFound { snapshot_id }.into());
    };

    decode(snapshot_id, "employees", &blob)
}

/// Load and decode a snapshot's domains.
///
/// # Errors
///
/// Returns `SnapshotNotFound` for a missing id and a `Serialization`
/// error for any blob that fails to decode.
pub fn load_snapshot_domains(conn: &Connection, snapshot_id: i64) -> Result<SnapshotDomains> {
    let blobs = fetch_domain_blobs(conn, snapshot_id)?;

    Ok(SnapshotDomains {
        employees: decode(snapshot_id, "employees", &blobs.employees)?,
        deputy_timesheets: decode_opt(snapshot_id, "deputy_timesheets", &blobs.deputy_timesheets)?,
        vend_balances: decode_opt(snapshot_id, "vend_balances", &blobs.vend_balances)?,
        payslips: match &blobs.payslips {
            Some(blob) => decode(snapshot_id, "payslips", blob)?,
            None => Vec::new(),
        },
        public_holidays: decode_opt(snapshot_id, "public_holidays", &blobs.public_holidays)?,
        bonus_calculations: decode_opt(
            snapshot_id,
            "bonus_calculations",
            &blobs.bonus_calculations,
        )?,
    })
}

/// Fetch the latest snapshot row for a run, if any.
pub fn latest_snapshot_row(conn: &Connection, run_id: i64) -> Result<Option<SnapshotRow>> {
    conn.query_row(
        "SELECT id, run_id, revision_id, snapshot_type, captured_at,
                content_hash, employee_count, total_size_bytes
         FROM payroll_snapshots
         WHERE run_id = ?1
         ORDER BY captured_at DESC, id DESC
         LIMIT 1",
        [run_id],
        row_to_snapshot_row,
    )
    .optional()
    .map_err(from_rusqlite)
}

/// List snapshot ids for a run in capture order.
pub fn list_snapshot_ids_for_run(conn: &Connection, run_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn
        .prepare(
            "SELECT id FROM payroll_snapshots
             WHERE run_id = ?1
             ORDER BY captured_at, id",
        )
        .map_err(from_rusqlite)?;
    let rows: std::result::Result<Vec<i64>, _> = stmt
        .query_map([run_id], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect();
    rows.map_err(from_rusqlite)
}

fn decode<T: serde::de::DeserializeOwned>(
    snapshot_id: i64,
    domain: &str,
    blob: &str,
) -> Result<T> {
    serde_json::from_str(blob).map_err(|e| {
        DomainError::MalformedBlob {
            snapshot_id,
            domain: domain.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn decode_opt(snapshot_id: i64, domain: &str, blob: &Option<String>) -> Result<Value> {
    match blob {
        Some(blob) => decode(snapshot_id, domain, blob),
        None => Ok(Value::Array(Vec::new())),
    }
}

fn row_to_snapshot_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SnapshotRow> {
    Ok(SnapshotRow {
        snapshot_id: row.get(0)?,
        run_id: row.get(1)?,
        revision_id: row.get(2)?,
        snapshot_type: row.get(3)?,
        captured_at: row.get(4)?,
        content_hash: row.get(5)?,
        employee_count: row.get(6)?,
        total_size_bytes: row.get(7)?,
    })
}
