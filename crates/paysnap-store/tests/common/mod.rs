// Shared helpers for store integration tests
// Not every binary uses every helper.
#![allow(dead_code)]

use chrono::NaiveDate;
use paysnap_core::model::{ConfigSnapshot, EmployeeRecord};
use paysnap_store::runs::{start_run, RunHandle, StartRun};
use rusqlite::Connection;

pub fn setup_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    paysnap_store::migrations::apply_migrations(&mut conn).unwrap();
    conn
}

pub fn setup_run(conn: &mut Connection) -> RunHandle {
    start_run(
        conn,
        &StartRun {
            period_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
            notes: Some("integration test run"),
            tenant_id: Some("tenant-a"),
            created_by: Some(1),
        },
    )
    .unwrap()
}

pub fn test_config() -> ConfigSnapshot {
    ConfigSnapshot {
        engine_version: "0.1.0".into(),
        tenant_id: "tenant-a".into(),
        captured_at: "2026-01-05T00:00:00Z".into(),
        dry_run: false,
        alternative_holiday_leave_type_id: None,
        account_payment_deduction_type_id: None,
    }
}

pub fn employee(user_id: i64, name: &str, gross: f64) -> EmployeeRecord {
    EmployeeRecord {
        user_id,
        name: name.into(),
        gross_earnings: gross,
        net_pay: gross * 0.8,
        total_hours: 40.0,
        ..Default::default()
    }
}
