//! Per-run revision log.
//!
//! Every mutating action against a run is recorded as a revision with a
//! strictly increasing number starting at 1. Rows are immutable once
//! written, except for the snapshot back-link filled in by capture.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::runs::require_run;
use paysnap_core::errors::{DomainError, PayError, PayErrorKind};
use paysnap_core::model::ActorContext;
use rusqlite::{Connection, ErrorCode, OptionalExtension, TransactionBehavior};

/// Retry budget for the number-allocation loop. The immediate
/// transaction already serializes writers on one connection; the loop
/// covers multi-connection races surfacing as UNIQUE violations.
const ALLOCATION_RETRIES: u32 = 3;

/// Input for recording one revision.
#[derive(Debug, Clone)]
pub struct RevisionInput<'a> {
    pub action_type: &'a str,
    pub description: Option<&'a str>,
    pub employees_affected: i64,
    pub total_pay_delta: f64,
    pub actor: ActorContext,
}

/// A row from the `payroll_revisions` table.
#[derive(Debug, Clone)]
pub struct RevisionRow {
    pub revision_id: i64,
    pub run_id: i64,
    pub revision_number: i64,
    pub action_type: String,
    pub description: Option<String>,
    pub employees_affected: i64,
    pub total_pay_delta: f64,
    pub actor_id: Option<i64>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub performed_at: i64,
    pub snapshot_id: Option<i64>,
}

/// Record a revision against a run, returning its id.
///
/// The revision number (per-run max + 1) is read and inserted inside a
/// single immediate transaction; a UNIQUE(run_id, revision_number)
/// conflict triggers a bounded retry rather than surfacing directly.
pub fn create_revision(
    conn: &mut Connection,
    run_id: i64,
    input: &RevisionInput<'_>,
) -> Result<i64> {
    require_run(conn, run_id)?;

    let mut attempts = 0;
    loop {
        match try_insert_revision(conn, run_id, input) {
            Ok((revision_id, revision_number)) => {
                tracing::info!(
                    run_id = run_id,
                    revision_id = revision_id,
                    revision_number = revision_number,
                    action = input.action_type,
                    "Created revision"
                );
                return Ok(revision_id);
            }
            Err(err) if is_unique_violation(&err) && attempts < ALLOCATION_RETRIES => {
                attempts += 1;
                tracing::debug!(
                    run_id = run_id,
                    attempt = attempts,
                    "Revision number conflict, retrying allocation"
                );
            }
            Err(err) => {
                return Err(if is_unique_violation(&err) {
                    PayError::new(PayErrorKind::Concurrency)
                        .with_op("create_revision")
                        .with_entity_id(run_id)
                        .with_message("Revision number allocation kept conflicting")
                } else {
                    from_rusqlite(err)
                });
            }
        }
    }
}

fn try_insert_revision(
    conn: &mut Connection,
    run_id: i64,
    input: &RevisionInput<'_>,
) -> std::result::Result<(i64, i64), rusqlite::Error> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let revision_number: i64 = tx.query_row(
        "SELECT IFNULL(MAX(revision_number), 0) + 1
         FROM payroll_revisions WHERE run_id = ?1",
        [run_id],
        |row| row.get(0),
    )?;

    let performed_at = chrono::Utc::now().timestamp_millis();

    tx.execute(
        "INSERT INTO payroll_revisions (
            run_id, revision_number, action_type, description,
            employees_affected, total_pay_delta,
            actor_id, ip_address, user_agent, performed_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            run_id,
            revision_number,
            input.action_type,
            input.description,
            input.employees_affected,
            input.total_pay_delta,
            input.actor.actor_id,
            input.actor.ip_address,
            input.actor.user_agent,
            performed_at,
        ],
    )?;

    let revision_id = tx.last_insert_rowid();
    tx.commit()?;

    Ok((revision_id, revision_number))
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

/// Fetch a revision row by id.
pub fn fetch_revision(conn: &Connection, revision_id: i64) -> Result<RevisionRow> {
    conn.query_row(
        "SELECT id, run_id, revision_number, action_type, description,
                employees_affected, total_pay_delta, actor_id, ip_address,
                user_agent, performed_at, snapshot_id
         FROM payroll_revisions WHERE id = ?1",
        [revision_id],
        row_to_revision,
    )
    .optional()
    .map_err(from_rusqlite)?
    .ok_or_else(|| DomainError::RevisionNotFound { revision_id }.into())
}

/// List all revisions for a run, ordered by revision number.
pub fn list_revisions_for_run(conn: &Connection, run_id: i64) -> Result<Vec<RevisionRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, run_id, revision_number, action_type, description,
                    employees_affected, total_pay_delta, actor_id, ip_address,
                    user_agent, performed_at, snapshot_id
             FROM payroll_revisions
             WHERE run_id = ?1
             ORDER BY revision_number",
        )
        .map_err(from_rusqlite)?;
    let rows: std::result::Result<Vec<_>, _> = stmt
        .query_map([run_id], row_to_revision)
        .map_err(from_rusqlite)?
        .collect();
    rows.map_err(from_rusqlite)
}

fn row_to_revision(row: &rusqlite::Row<'_>) -> rusqlite::Result<RevisionRow> {
    Ok(RevisionRow {
        revision_id: row.get(0)?,
        run_id: row.get(1)?,
        revision_number: row.get(2)?,
        action_type: row.get(3)?,
        description: row.get(4)?,
        employees_affected: row.get(5)?,
        total_pay_delta: row.get(6)?,
        actor_id: row.get(7)?,
        ip_address: row.get(8)?,
        user_agent: row.get(9)?,
        performed_at: row.get(10)?,
        snapshot_id: row.get(11)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runs::{start_run, StartRun};
    use chrono::NaiveDate;
    use paysnap_core::errors::PayErrorKind;

    fn setup() -> (Connection, i64) {
        let mut conn = Connection::open_in_memory().unwrap();
        crate::migrations::apply_migrations(&mut conn).unwrap();
        let handle = start_run(
            &mut conn,
            &StartRun {
                period_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                period_end: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
                payment_date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
                notes: None,
                tenant_id: None,
                created_by: None,
            },
        )
        .unwrap();
        (conn, handle.run_id)
    }

    fn input<'a>(action: &'a str) -> RevisionInput<'a> {
        RevisionInput {
            action_type: action,
            description: None,
            employees_affected: 0,
            total_pay_delta: 0.0,
            actor: ActorContext::user(1),
        }
    }

    #[test]
    fn test_revision_numbers_are_gapless() {
        let (mut conn, run_id) = setup();
        for _ in 0..5 {
            create_revision(&mut conn, run_id, &input("load_payroll")).unwrap();
        }
        let numbers: Vec<i64> = list_revisions_for_run(&conn, run_id)
            .unwrap()
            .iter()
            .map(|r| r.revision_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_numbering_is_scoped_per_run() {
        let (mut conn, run_a) = setup();
        let run_b = start_run(
            &mut conn,
            &StartRun {
                period_start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                period_end: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
                payment_date: NaiveDate::from_ymd_opt(2026, 2, 16).unwrap(),
                notes: None,
                tenant_id: None,
                created_by: None,
            },
        )
        .unwrap()
        .run_id;

        create_revision(&mut conn, run_a, &input("load_payroll")).unwrap();
        create_revision(&mut conn, run_a, &input("calculate_bonuses")).unwrap();
        let first_b = create_revision(&mut conn, run_b, &input("load_payroll")).unwrap();

        assert_eq!(fetch_revision(&conn, first_b).unwrap().revision_number, 1);
    }

    #[test]
    fn test_revision_records_actor_metadata() {
        let (mut conn, run_id) = setup();
        let revision_id = create_revision(
            &mut conn,
            run_id,
            &RevisionInput {
                action_type: "push_to_provider",
                description: Some("Push all payslips"),
                employees_affected: 12,
                total_pay_delta: 340.5,
                actor: ActorContext {
                    actor_id: Some(7),
                    ip_address: Some("10.0.0.1".into()),
                    user_agent: Some("paysnap-cli".into()),
                },
            },
        )
        .unwrap();

        let row = fetch_revision(&conn, revision_id).unwrap();
        assert_eq!(row.action_type, "push_to_provider");
        assert_eq!(row.employees_affected, 12);
        assert_eq!(row.actor_id, Some(7));
        assert_eq!(row.ip_address.as_deref(), Some("10.0.0.1"));
        assert!(row.snapshot_id.is_none());
    }

    #[test]
    fn test_create_revision_for_missing_run_is_not_found() {
        let (mut conn, _) = setup();
        let err = create_revision(&mut conn, 404, &input("load_payroll")).unwrap_err();
        assert_eq!(err.kind(), PayErrorKind::NotFound);
    }
}
