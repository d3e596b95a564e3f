// Test suite for on-disk database lifecycle
// Exercises open/configure against a real file plus the projection
// read accessors over a captured snapshot.

mod common;

use common::{employee, test_config};
use chrono::NaiveDate;
use paysnap_core::model::{EarningLineRecord, SnapshotType};
use paysnap_store::runs::{start_run, StartRun};
use paysnap_store::snapshot::capture::{capture_snapshot, CaptureRequest};
use paysnap_store::snapshot::details::{
    list_deduction_lines, list_earning_lines, list_employee_details,
};
use tempfile::TempDir;

#[test]
fn test_full_capture_cycle_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("payroll.db");

    let mut conn = paysnap_store::db::open(&db_path).unwrap();
    paysnap_store::db::configure(&conn).unwrap();
    paysnap_store::migrations::apply_migrations(&mut conn).unwrap();

    let run = start_run(
        &mut conn,
        &StartRun {
            period_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
            notes: None,
            tenant_id: Some("tenant-a"),
            created_by: Some(1),
        },
    )
    .unwrap();

    let mut record = employee(1, "A", 1000.0);
    record.earning_lines = vec![EarningLineRecord {
        line_type: "ordinary".into(),
        total: 1000.0,
        ..Default::default()
    }];
    let employees = vec![record, employee(2, "B", 800.0)];
    let config = test_config();

    let snapshot_id = capture_snapshot(
        &mut conn,
        &CaptureRequest {
            run_id: run.run_id,
            revision_id: None,
            snapshot_type: SnapshotType::PreLoad,
            employees: &employees,
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
    .unwrap();

    // Reopen the file and read the projection back
    drop(conn);
    let conn = paysnap_store::db::open(&db_path).unwrap();

    let details = list_employee_details(&conn, run.run_id, snapshot_id).unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].user_id, 1);
    assert_eq!(details[0].gross_earnings, 1000.0);
    assert_eq!(details[1].user_id, 2);

    let earning_lines = list_earning_lines(&conn, details[0].detail_id).unwrap();
    assert_eq!(earning_lines.len(), 1);
    assert_eq!(earning_lines[0].earning_type, "ordinary");
    assert_eq!(earning_lines[0].total_amount, 1000.0);

    assert!(list_deduction_lines(&conn, details[0].detail_id)
        .unwrap()
        .is_empty());

    // The full record survives as JSON on the detail row
    let decoded: paysnap_core::model::EmployeeRecord =
        serde_json::from_str(&details[0].employee_json).unwrap();
    assert_eq!(decoded.user_id, 1);
}
