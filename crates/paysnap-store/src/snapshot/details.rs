//! Read access to the employee projection.
//!
//! The persisted layout is internal schema; callers read details and
//! child lines through these typed accessors.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;

/// A projected employee-detail row (key fields; the complete record is
/// in `employee_json`).
#[derive(Debug, Clone)]
pub struct EmployeeDetailRow {
    pub detail_id: i64,
    pub run_id: i64,
    pub snapshot_id: i64,
    pub user_id: i64,
    pub external_employee_id: Option<String>,
    pub external_payslip_id: Option<String>,
    pub employee_name: String,
    pub employee_email: Option<String>,
    pub total_hours: f64,
    pub gross_earnings: f64,
    pub total_deductions: f64,
    pub net_pay: f64,
    pub processing_status: String,
    pub employee_json: String,
}

/// One projected earning line.
#[derive(Debug, Clone)]
pub struct EarningLineRow {
    pub line_id: i64,
    pub employee_detail_id: i64,
    pub earning_type: String,
    pub units: Option<f64>,
    pub rate_per_unit: Option<f64>,
    pub fixed_amount: Option<f64>,
    pub total_amount: f64,
    pub is_leave: bool,
    pub is_overtime: bool,
    pub is_bonus: bool,
    pub is_public_holiday: bool,
}

/// One projected deduction line.
#[derive(Debug, Clone)]
pub struct DeductionLineRow {
    pub line_id: i64,
    pub employee_detail_id: i64,
    pub deduction_type: String,
    pub amount: f64,
    pub allocation_status: String,
}

/// List the projected employee details for a snapshot, ordered by user id.
pub fn list_employee_details(
    conn: &Connection,
    run_id: i64,
    snapshot_id: i64,
) -> Result<Vec<EmployeeDetailRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, run_id, snapshot_id, user_id,
                    external_employee_id, external_payslip_id,
                    employee_name, employee_email,
                    total_hours, gross_earnings, total_deductions, net_pay,
                    processing_status, employee_json
             FROM payroll_employee_details
             WHERE run_id = ?1 AND snapshot_id = ?2
             ORDER BY user_id",
        )
        .map_err(from_rusqlite)?;
    let rows: std::result::Result<Vec<_>, _> = stmt
        .query_map(rusqlite::params![run_id, snapshot_id], |row| {
            Ok(EmployeeDetailRow {
                detail_id: row.get(0)?,
                run_id: row.get(1)?,
                snapshot_id: row.get(2)?,
                user_id: row.get(3)?,
                external_employee_id: row.get(4)?,
                external_payslip_id: row.get(5)?,
                employee_name: row.get(6)?,
                employee_email: row.get(7)?,
                total_hours: row.get(8)?,
                gross_earnings: row.get(9)?,
                total_deductions: row.get(10)?,
                net_pay: row.get(11)?,
                processing_status: row.get(12)?,
                employee_json: row.get(13)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect();
    rows.map_err(from_rusqlite)
}

/// List the earning lines under one employee detail.
pub fn list_earning_lines(
    conn: &Connection,
    employee_detail_id: i64,
) -> Result<Vec<EarningLineRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, employee_detail_id, earning_type, units, rate_per_unit,
                    fixed_amount, total_amount, is_leave, is_overtime,
                    is_bonus, is_public_holiday
             FROM payroll_earning_lines
             WHERE employee_detail_id = ?1
             ORDER BY id",
        )
        .map_err(from_rusqlite)?;
    let rows: std::result::Result<Vec<_>, _> = stmt
        .query_map([employee_detail_id], |row| {
            Ok(EarningLineRow {
                line_id: row.get(0)?,
                employee_detail_id: row.get(1)?,
                earning_type: row.get(2)?,
                units: row.get(3)?,
                rate_per_unit: row.get(4)?,
                fixed_amount: row.get(5)?,
                total_amount: row.get(6)?,
                is_leave: row.get(7)?,
                is_overtime: row.get(8)?,
                is_bonus: row.get(9)?,
                is_public_holiday: row.get(10)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect();
    rows.map_err(from_rusqlite)
}

/// List the deduction lines under one employee detail.
pub fn list_deduction_lines(
    conn: &Connection,
    employee_detail_id: i64,
) -> Result<Vec<DeductionLineRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, employee_detail_id, deduction_type, amount, allocation_status
             FROM payroll_deduction_lines
             WHERE employee_detail_id = ?1
             ORDER BY id",
        )
        .map_err(from_rusqlite)?;
    let rows: std::result::Result<Vec<_>, _> = stmt
        .query_map([employee_detail_id], |row| {
            Ok(DeductionLineRow {
                line_id: row.get(0)?,
                employee_detail_id: row.get(1)?,
                deduction_type: row.get(2)?,
                amount: row.get(3)?,
                allocation_status: row.get(4)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect();
    rows.map_err(from_rusqlite)
}
