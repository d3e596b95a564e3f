//! Pay-run lifecycle management.
//!
//! Runs are created once, numbered sequentially across the whole store,
//! and mutated only through [`update_run_status`]. Rows are never
//! deleted.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use chrono::NaiveDate;
use paysnap_core::errors::DomainError;
use paysnap_core::model::RunStatus;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

/// Input for starting a new pay run.
#[derive(Debug, Clone)]
pub struct StartRun<'a> {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub payment_date: NaiveDate,
    pub notes: Option<&'a str>,
    pub tenant_id: Option<&'a str>,
    pub created_by: Option<i64>,
}

/// Identifiers handed back to the caller after run creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHandle {
    pub run_id: i64,
    pub run_uuid: String,
    pub run_number: i64,
}

/// A row from the `payroll_runs` table.
#[derive(Debug, Clone)]
pub struct PayRunRow {
    pub run_id: i64,
    pub run_uuid: String,
    pub run_number: i64,
    pub period_start: String,
    pub period_end: String,
    pub payment_date: String,
    pub status: RunStatus,
    pub tenant_id: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<i64>,
    pub started_at: i64,
    pub updated_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub completed_by: Option<i64>,
}

/// Start a new pay run in `draft` status.
///
/// The run number is the current maximum across all runs plus one,
/// allocated inside an immediate transaction so concurrent starts cannot
/// collide; the UNIQUE constraint on `run_number` is the backstop.
/// Period/payment date consistency is the caller's responsibility.
pub fn start_run(conn: &mut Connection, input: &StartRun<'_>) -> Result<RunHandle> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let run_number: i64 = tx
        .query_row(
            "SELECT IFNULL(MAX(run_number), 0) + 1 FROM payroll_runs",
            [],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;

    let run_uuid = uuid::Uuid::new_v4().to_string();
    let started_at = chrono::Utc::now().timestamp_millis();

    tx.execute(
        "INSERT INTO payroll_runs (
            run_uuid, run_number, period_start, period_end, payment_date,
            status, tenant_id, notes, created_by, started_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            run_uuid,
            run_number,
            input.period_start.format("%Y-%m-%d").to_string(),
            input.period_end.format("%Y-%m-%d").to_string(),
            input.payment_date.format("%Y-%m-%d").to_string(),
            RunStatus::Draft.as_str(),
            input.tenant_id,
            input.notes,
            input.created_by,
            started_at,
        ],
    )
    .map_err(from_rusqlite)?;

    let run_id = tx.last_insert_rowid();
    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(
        run_id = run_id,
        run_number = run_number,
        period_start = %input.period_start,
        period_end = %input.period_end,
        "Started pay run"
    );

    Ok(RunHandle {
        run_id,
        run_uuid,
        run_number,
    })
}

/// Update a run's status.
///
/// `posted` and `completed` additionally stamp completion metadata.
/// No transition validation is performed; sequencing is owned by the
/// orchestration layer.
pub fn update_run_status(
    conn: &Connection,
    run_id: i64,
    status: RunStatus,
    actor_id: Option<i64>,
) -> Result<()> {
    let now = chrono::Utc::now().timestamp_millis();

    let affected = conn
        .execute(
            "UPDATE payroll_runs SET status = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![status.as_str(), now, run_id],
        )
        .map_err(from_rusqlite)?;

    if affected == 0 {
        return Err(DomainError::RunNotFound { run_id }.into());
    }

    if status.stamps_completion() {
        conn.execute(
            "UPDATE payroll_runs SET completed_at = ?1, completed_by = ?2 WHERE id = ?3",
            rusqlite::params![now, actor_id, run_id],
        )
        .map_err(from_rusqlite)?;
    }

    tracing::info!(run_id = run_id, status = status.as_str(), "Updated run status");

    Ok(())
}

/// Fetch a full run row by id.
pub fn fetch_run(conn: &Connection, run_id: i64) -> Result<PayRunRow> {
    let row = conn
        .query_row(
            "SELECT id, run_uuid, run_number, period_start, period_end, payment_date,
                    status, tenant_id, notes, created_by, started_at, updated_at,
                    completed_at, completed_by
             FROM payroll_runs WHERE id = ?1",
            [run_id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, Option<String>>(7)?,
                    row.get::<_, Option<String>>(8)?,
                    row.get::<_, Option<i64>>(9)?,
                    row.get::<_, i64>(10)?,
                    row.get::<_, Option<i64>>(11)?,
                    row.get::<_, Option<i64>>(12)?,
                    row.get::<_, Option<i64>>(13)?,
                ))
            },
        )
        .optional()
        .map_err(from_rusqlite)?;

    let Some(row) = row else {
        return Err(DomainError::RunNotFound { run_id }.into());
    };

    Ok(PayRunRow {
        run_id: row.0,
        run_uuid: row.1,
        run_number: row.2,
        period_start: row.3,
        period_end: row.4,
        payment_date: row.5,
        status: RunStatus::parse(&row.6)?,
        tenant_id: row.7,
        notes: row.8,
        created_by: row.9,
        started_at: row.10,
        updated_at: row.11,
        completed_at: row.12,
        completed_by: row.13,
    })
}

/// Check that a run exists without fetching the full row.
pub(crate) fn require_run(conn: &Connection, run_id: i64) -> Result<()> {
    let exists: bool = conn
        .query_row(
            "SELECT 1 FROM payroll_runs WHERE id = ?1",
            [run_id],
            |_| Ok(true),
        )
        .optional()
        .map_err(from_rusqlite)?
        .unwrap_or(false);

    if exists {
        Ok(())
    } else {
        Err(DomainError::RunNotFound { run_id }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paysnap_core::errors::PayErrorKind;

    fn setup() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        crate::migrations::apply_migrations(&mut conn).unwrap();
        conn
    }

    fn start(conn: &mut Connection) -> RunHandle {
        start_run(
            conn,
            &StartRun {
                period_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                period_end: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
                payment_date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
                notes: None,
                tenant_id: Some("tenant-a"),
                created_by: Some(10),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_run_numbers_are_sequential() {
        let mut conn = setup();
        let first = start(&mut conn);
        let second = start(&mut conn);
        assert_eq!(first.run_number, 1);
        assert_eq!(second.run_number, 2);
        assert_ne!(first.run_uuid, second.run_uuid);
    }

    #[test]
    fn test_new_run_is_draft() {
        let mut conn = setup();
        let handle = start(&mut conn);
        let row = fetch_run(&conn, handle.run_id).unwrap();
        assert_eq!(row.status, RunStatus::Draft);
        assert!(row.completed_at.is_none());
    }

    #[test]
    fn test_completed_status_stamps_completion() {
        let mut conn = setup();
        let handle = start(&mut conn);
        update_run_status(&conn, handle.run_id, RunStatus::Completed, Some(99)).unwrap();
        let row = fetch_run(&conn, handle.run_id).unwrap();
        assert_eq!(row.status, RunStatus::Completed);
        assert!(row.completed_at.is_some());
        assert_eq!(row.completed_by, Some(99));
    }

    #[test]
    fn test_intermediate_status_leaves_completion_unset() {
        let mut conn = setup();
        let handle = start(&mut conn);
        update_run_status(&conn, handle.run_id, RunStatus::Loaded, Some(99)).unwrap();
        let row = fetch_run(&conn, handle.run_id).unwrap();
        assert!(row.completed_at.is_none());
        assert!(row.completed_by.is_none());
    }

    #[test]
    fn test_update_missing_run_is_not_found() {
        let conn = setup();
        let err = update_run_status(&conn, 404, RunStatus::Posted, None).unwrap_err();
        assert_eq!(err.kind(), PayErrorKind::NotFound);
    }

    #[test]
    fn test_run_uuid_is_v4() {
        let mut conn = setup();
        let handle = start(&mut conn);
        let parsed = uuid::Uuid::parse_str(&handle.run_uuid).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }
}
