// Test suite for snapshot integrity verification
// Covers self-integrity after capture, tamper detection on both the
// stored hash and the stored blobs, and run-level aggregation.

mod common;

use common::{employee, setup_conn, setup_run, test_config};
use paysnap_core::errors::PayErrorKind;
use paysnap_core::model::{EmployeeRecord, SnapshotType};
use paysnap_store::snapshot::capture::{capture_snapshot, CaptureRequest};
use paysnap_store::snapshot::verify::{verify_run, verify_snapshot};
use rusqlite::Connection;

fn capture(conn: &mut Connection, run_id: i64, employees: &[EmployeeRecord]) -> i64 {
    let config = test_config();
    capture_snapshot(
        conn,
        &CaptureRequest {
            run_id,
            revision_id: None,
            snapshot_type: SnapshotType::Manual,
            employees,
            deputy_timesheets: None,
            vend_balances: None,
            payslips: None,
            external_employees: None,
            public_holidays: None,
            bonus_calculations: None,
            amendments: None,
            config: &config,
        },
    )
    .unwrap()
}

#[test]
fn test_fresh_capture_verifies_valid() {
    let mut conn = setup_conn();
    let run = setup_run(&mut conn);
    let snapshot = capture(&mut conn, run.run_id, &[employee(1, "A", 1000.0)]);

    let result = verify_snapshot(&conn, snapshot).unwrap();
    assert!(result.valid);
    assert!(result.hash_match);
    assert_eq!(result.stored_hash, result.computed_hash);
}

#[test]
fn test_tampered_stored_hash_is_reported_not_raised() {
    let mut conn = setup_conn();
    let run = setup_run(&mut conn);
    let snapshot = capture(&mut conn, run.run_id, &[employee(1, "A", 1000.0)]);

    // Flip one character of the stored hash
    let stored: String = conn
        .query_row(
            "SELECT content_hash FROM payroll_snapshots WHERE id = ?1",
            [snapshot],
            |row| row.get(0),
        )
        .unwrap();
    let first = if stored.starts_with('0') { "1" } else { "0" };
    let mutated = format!("{}{}", first, &stored[1..]);
    conn.execute(
        "UPDATE payroll_snapshots SET content_hash = ?1 WHERE id = ?2",
        rusqlite::params![mutated, snapshot],
    )
    .unwrap();

    let result = verify_snapshot(&conn, snapshot).unwrap();
    assert!(!result.valid);
    assert!(!result.hash_match);
    assert_ne!(result.computed_hash, result.stored_hash);
    assert_eq!(result.stored_hash, mutated);
}

#[test]
fn test_tampered_blob_invalidates_snapshot() {
    let mut conn = setup_conn();
    let run = setup_run(&mut conn);
    let snapshot = capture(&mut conn, run.run_id, &[employee(1, "A", 1000.0)]);

    conn.execute(
        "UPDATE payroll_snapshots SET employees_json = '[]' WHERE id = ?1",
        [snapshot],
    )
    .unwrap();

    let result = verify_snapshot(&conn, snapshot).unwrap();
    assert!(!result.valid);
}

#[test]
fn test_verify_missing_snapshot_is_not_found() {
    let conn = setup_conn();
    let err = verify_snapshot(&conn, 404).unwrap_err();
    assert_eq!(err.kind(), PayErrorKind::NotFound);
}

#[test]
fn test_verify_run_aggregates_in_capture_order() {
    let mut conn = setup_conn();
    let run = setup_run(&mut conn);
    let first = capture(&mut conn, run.run_id, &[employee(1, "A", 1000.0)]);
    let second = capture(&mut conn, run.run_id, &[employee(1, "A", 1200.0)]);
    let third = capture(&mut conn, run.run_id, &[employee(1, "A", 1300.0)]);

    // Corrupt the middle snapshot only
    conn.execute(
        "UPDATE payroll_snapshots SET content_hash = 'bogus' WHERE id = ?1",
        [second],
    )
    .unwrap();

    let report = verify_run(&conn, run.run_id).unwrap();
    assert_eq!(report.total_snapshots, 3);
    assert_eq!(report.valid_count, 2);
    assert_eq!(report.invalid_count, 1);
    assert!(!report.all_valid);
    let ids: Vec<i64> = report.results.iter().map(|r| r.snapshot_id).collect();
    assert_eq!(ids, vec![first, second, third]);
    assert!(!report.results[1].valid);
}

#[test]
fn test_verify_run_with_no_snapshots() {
    let mut conn = setup_conn();
    let run = setup_run(&mut conn);
    let report = verify_run(&conn, run.run_id).unwrap();
    assert_eq!(report.total_snapshots, 0);
    assert!(report.all_valid);
}

#[test]
fn test_verify_missing_run_is_not_found() {
    let conn = setup_conn();
    let err = verify_run(&conn, 404).unwrap_err();
    assert_eq!(err.kind(), PayErrorKind::NotFound);
}
