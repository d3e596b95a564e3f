//! Normalized employee projection.
//!
//! Extracts key fields from the opaque employee domain into queryable
//! rows, plus child line items and linked provider payslip lines. Runs
//! inside the capture transaction.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use paysnap_core::model::EmployeeRecord;
use paysnap_core::payslip::PayslipFlat;
use rusqlite::Transaction;
use std::collections::HashMap;

/// Upsert one employee-detail row per record and rebuild its child
/// lines.
///
/// Idempotent per (snapshot, user): a repeated record updates the
/// projection row in place and replaces its child lines instead of
/// duplicating them.
pub fn store_employee_details(
    tx: &Transaction<'_>,
    run_id: i64,
    snapshot_id: i64,
    employees: &[EmployeeRecord],
) -> Result<()> {
    let mut upsert = tx
        .prepare(
            "INSERT INTO payroll_employee_details (
                run_id, snapshot_id, user_id,
                external_employee_id, external_payslip_id,
                deputy_employee_id, vend_customer_id,
                employee_name, employee_email,
                total_hours, ordinary_hours, overtime_hours, leave_hours, public_holiday_hours,
                base_pay, overtime_pay, commission, monthly_bonus,
                google_review_bonus, vape_drops_bonus, other_bonuses,
                leave_pay, public_holiday_pay, gross_earnings,
                account_payment_deduction, other_deductions, total_deductions,
                net_pay, hourly_rate, salary_annual,
                vend_account_balance, deputy_timesheet_count,
                deputy_first_punch, deputy_last_punch,
                public_holiday_worked, public_holiday_preference,
                alternative_holiday_created, alternative_holiday_hours,
                processing_status, skip_reason, error_message,
                employee_json
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20,
                ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30,
                ?31, ?32, ?33, ?34, ?35, ?36, ?37, ?38, ?39, ?40,
                ?41, ?42
            )
            ON CONFLICT (snapshot_id, user_id) DO UPDATE SET
                total_hours = excluded.total_hours,
                gross_earnings = excluded.gross_earnings,
                net_pay = excluded.net_pay,
                processing_status = excluded.processing_status,
                employee_json = excluded.employee_json",
        )
        .map_err(from_rusqlite)?;

    for employee in employees {
        let employee_json = serde_json::to_string(employee)?;
        upsert
            .execute(rusqlite::params![
                run_id,
                snapshot_id,
                employee.user_id,
                employee.external_employee_id,
                employee.external_payslip_id,
                employee.deputy_employee_id,
                employee.vend_customer_id,
                employee.name,
                employee.email,
                employee.total_hours,
                employee.ordinary_hours,
                employee.overtime_hours,
                employee.leave_hours,
                employee.public_holiday_hours,
                employee.base_pay,
                employee.overtime_pay,
                employee.commission,
                employee.monthly_bonus,
                employee.google_review_bonus,
                employee.vape_drops_bonus,
                employee.other_bonuses,
                employee.leave_pay,
                employee.public_holiday_pay,
                employee.gross_earnings,
                employee.account_payment_deduction,
                employee.other_deductions,
                employee.total_deductions,
                employee.net_pay,
                employee.hourly_rate,
                employee.salary_annual,
                employee.vend_account_balance,
                employee.deputy_timesheet_count,
                employee.deputy_first_punch,
                employee.deputy_last_punch,
                !employee.public_holiday_info.is_empty(),
                employee.public_holiday_preference,
                employee.alternative_holiday_created,
                employee.alternative_holiday_hours,
                employee.processing_status,
                employee.skip_reason,
                employee.error_message,
                employee_json,
            ])
            .map_err(from_rusqlite)?;

        let detail_id: i64 = tx
            .query_row(
                "SELECT id FROM payroll_employee_details
                 WHERE snapshot_id = ?1 AND user_id = ?2",
                rusqlite::params![snapshot_id, employee.user_id],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;

        // Rebuild child lines so a repeated record cannot duplicate them
        for table in [
            "payroll_earning_lines",
            "payroll_deduction_lines",
            "payroll_public_holidays",
        ] {
            tx.execute(
                &format!("DELETE FROM {} WHERE employee_detail_id = ?1", table),
                [detail_id],
            )
            .map_err(from_rusqlite)?;
        }

        store_earning_lines(tx, detail_id, employee)?;
        store_deduction_lines(tx, detail_id, employee)?;
        store_public_holiday_details(tx, detail_id, employee)?;
    }

    Ok(())
}

fn store_earning_lines(
    tx: &Transaction<'_>,
    detail_id: i64,
    employee: &EmployeeRecord,
) -> Result<()> {
    let mut stmt = tx
        .prepare(
            "INSERT INTO payroll_earning_lines (
                employee_detail_id, earning_type, rate_id, rate_name,
                units, rate_per_unit, fixed_amount, total_amount,
                is_leave, is_overtime, is_bonus, is_public_holiday,
                source_type, source_reference, description, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        )
        .map_err(from_rusqlite)?;

    for line in &employee.earning_lines {
        stmt.execute(rusqlite::params![
            detail_id,
            line.line_type,
            line.rate_id,
            line.rate_name,
            line.units,
            line.rate_per_unit,
            line.fixed_amount,
            line.total,
            line.is_leave,
            line.is_overtime,
            line.is_bonus,
            line.is_public_holiday,
            line.source,
            line.source_ref,
            line.description,
            line.notes,
        ])
        .map_err(from_rusqlite)?;
    }

    Ok(())
}

fn store_deduction_lines(
    tx: &Transaction<'_>,
    detail_id: i64,
    employee: &EmployeeRecord,
) -> Result<()> {
    let mut stmt = tx
        .prepare(
            "INSERT INTO payroll_deduction_lines (
                employee_detail_id, deduction_type, deduction_code, deduction_name,
                amount, vend_customer_id, vend_payment_id,
                allocation_status, allocated_at, allocation_error,
                source_type, source_reference, description, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )
        .map_err(from_rusqlite)?;

    for line in &employee.deduction_lines {
        stmt.execute(rusqlite::params![
            detail_id,
            line.line_type,
            line.code,
            line.name,
            line.amount,
            line.vend_customer_id,
            line.vend_payment_id,
            line.allocation_status,
            line.allocated_at,
            line.allocation_error,
            line.source,
            line.source_ref,
            line.description,
            line.notes,
        ])
        .map_err(from_rusqlite)?;
    }

    Ok(())
}

fn store_public_holiday_details(
    tx: &Transaction<'_>,
    detail_id: i64,
    employee: &EmployeeRecord,
) -> Result<()> {
    let mut stmt = tx
        .prepare(
            "INSERT INTO payroll_public_holidays (
                employee_detail_id, holiday_date, holiday_name,
                hours_worked, worked, preference,
                earnings_zeroed, alternative_holiday_created,
                leave_hours_granted, external_leave_id,
                ordinary_pay_removed, public_holiday_rate_applied,
                total_pay_impact, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )
        .map_err(from_rusqlite)?;

    for holiday in &employee.public_holiday_info {
        stmt.execute(rusqlite::params![
            detail_id,
            holiday.date,
            holiday.name,
            holiday.hours_worked,
            holiday.worked(),
            holiday.preference,
            holiday.earnings_zeroed,
            holiday.alternative_holiday_created,
            holiday.leave_hours_granted,
            holiday.external_leave_id,
            holiday.ordinary_pay_removed,
            holiday.public_holiday_rate_applied,
            holiday.total_pay_impact,
            holiday.notes,
        ])
        .map_err(from_rusqlite)?;
    }

    Ok(())
}

/// Column values shared by every payslip line category.
#[derive(Default)]
struct LineValues {
    line_type_id: Option<String>,
    display_name: Option<String>,
    description: Option<String>,
    rate_per_unit: Option<f64>,
    number_of_units: Option<f64>,
    fixed_amount: Option<f64>,
    percentage: Option<f64>,
    calculated_amount: f64,
    is_linked_to_timesheet: bool,
    is_average_daily_pay_rate: bool,
    auto_calculate: bool,
    tax_type: Option<String>,
    employee_contribution: Option<f64>,
    employer_contribution: Option<f64>,
    leave_type_id: Option<String>,
    leave_units: Option<f64>,
}

/// Store individual provider payslip line items.
///
/// Links each payslip to its employee-detail row via the external
/// employee id captured in the same snapshot. Payslips that cannot be
/// linked are skipped without surfacing an error.
pub fn store_payslip_lines(
    tx: &Transaction<'_>,
    run_id: i64,
    snapshot_id: i64,
    payslips: &[PayslipFlat],
) -> Result<()> {
    // Map external employee ids to their employee_detail_id
    let mut detail_map: HashMap<String, i64> = HashMap::new();
    {
        let mut stmt = tx
            .prepare(
                "SELECT external_employee_id, id FROM payroll_employee_details
                 WHERE run_id = ?1 AND snapshot_id = ?2
                   AND external_employee_id IS NOT NULL",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(rusqlite::params![run_id, snapshot_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })
            .map_err(from_rusqlite)?;
        for row in rows {
            let (external_id, detail_id) = row.map_err(from_rusqlite)?;
            detail_map.insert(external_id, detail_id);
        }
    }

    let mut stmt = tx
        .prepare(
            "INSERT INTO payroll_payslip_lines (
                run_id, snapshot_id, employee_detail_id,
                payslip_id, external_employee_id,
                line_category, line_type_id, display_name, description,
                rate_per_unit, number_of_units, fixed_amount, percentage, calculated_amount,
                is_linked_to_timesheet, is_average_daily_pay_rate, auto_calculate,
                tax_type, employee_contribution, employer_contribution,
                leave_type_id, leave_units,
                period_start_date, period_end_date, payment_date,
                full_line_json
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20,
                ?21, ?22, ?23, ?24, ?25, ?26
            )",
        )
        .map_err(from_rusqlite)?;

    let mut stored = 0usize;
    let mut skipped = 0usize;

    for payslip in payslips {
        let (Some(payslip_id), Some(employee_id)) =
            (payslip.payslip_id.as_deref(), payslip.employee_id.as_deref())
        else {
            skipped += 1;
            tracing::debug!(
                snapshot_id = snapshot_id,
                "Skipping payslip without identification"
            );
            continue;
        };

        let Some(&detail_id) = detail_map.get(employee_id) else {
            skipped += 1;
            tracing::debug!(
                snapshot_id = snapshot_id,
                external_employee_id = employee_id,
                "Skipping payslip lines for unlinkable employee"
            );
            continue;
        };

        let mut insert_line = |category: &str, values: LineValues, json: String| {
            stmt.execute(rusqlite::params![
                run_id,
                snapshot_id,
                detail_id,
                payslip_id,
                employee_id,
                category,
                values.line_type_id,
                values.display_name,
                values.description,
                values.rate_per_unit,
                values.number_of_units,
                values.fixed_amount,
                values.percentage,
                values.calculated_amount,
                values.is_linked_to_timesheet,
                values.is_average_daily_pay_rate,
                values.auto_calculate,
                values.tax_type,
                values.employee_contribution,
                values.employer_contribution,
                values.leave_type_id,
                values.leave_units,
                payslip.period_start_date,
                payslip.period_end_date,
                payslip.payment_date,
                json,
            ])
            .map_err(from_rusqlite)
        };

        for line in &payslip.earnings_lines {
            insert_line(
                "earnings",
                LineValues {
                    line_type_id: line.earnings_rate_id.clone(),
                    display_name: line.display_name.clone(),
                    rate_per_unit: line.rate_per_unit,
                    number_of_units: line.number_of_units,
                    fixed_amount: line.fixed_amount,
                    calculated_amount: line.amount.unwrap_or(0.0),
                    is_linked_to_timesheet: line.is_linked_to_timesheet.unwrap_or(false),
                    is_average_daily_pay_rate: line.is_average_daily_pay_rate.unwrap_or(false),
                    ..Default::default()
                },
                serde_json::to_string(line)?,
            )?;
            stored += 1;
        }

        for line in &payslip.deduction_lines {
            insert_line(
                "deduction",
                LineValues {
                    line_type_id: line.deduction_type_id.clone(),
                    display_name: line.display_name.clone(),
                    percentage: line.percentage,
                    calculated_amount: line.amount.unwrap_or(0.0),
                    ..Default::default()
                },
                serde_json::to_string(line)?,
            )?;
            stored += 1;
        }

        for line in &payslip.leave_earnings_lines {
            insert_line(
                "leave_earnings",
                LineValues {
                    line_type_id: line.earnings_rate_id.clone(),
                    display_name: line.display_name.clone(),
                    rate_per_unit: line.rate_per_unit,
                    number_of_units: line.number_of_units,
                    fixed_amount: line.fixed_amount,
                    calculated_amount: line.amount.unwrap_or(0.0),
                    leave_units: line.number_of_units,
                    ..Default::default()
                },
                serde_json::to_string(line)?,
            )?;
            stored += 1;
        }

        for line in &payslip.reimbursement_lines {
            insert_line(
                "reimbursement",
                LineValues {
                    line_type_id: line.reimbursement_type_id.clone(),
                    display_name: line.description.clone(),
                    description: line.description.clone(),
                    calculated_amount: line.amount.unwrap_or(0.0),
                    ..Default::default()
                },
                serde_json::to_string(line)?,
            )?;
            stored += 1;
        }

        for line in &payslip.employee_tax_lines {
            insert_line(
                "employee_tax",
                LineValues {
                    line_type_id: line.tax_type_id.clone(),
                    display_name: line.description.clone(),
                    description: line.description.clone(),
                    calculated_amount: line.amount.unwrap_or(0.0),
                    tax_type: line.description.clone(),
                    ..Default::default()
                },
                serde_json::to_string(line)?,
            )?;
            stored += 1;
        }

        for line in &payslip.employer_tax_lines {
            insert_line(
                "employer_tax",
                LineValues {
                    line_type_id: line.tax_type_id.clone(),
                    display_name: line.description.clone(),
                    description: line.description.clone(),
                    calculated_amount: line.amount.unwrap_or(0.0),
                    tax_type: line.description.clone(),
                    ..Default::default()
                },
                serde_json::to_string(line)?,
            )?;
            stored += 1;
        }

        for line in &payslip.superannuation_lines {
            insert_line(
                "superannuation",
                LineValues {
                    line_type_id: line.superannuation_type_id.clone(),
                    display_name: line.display_name.clone(),
                    percentage: line.percentage,
                    calculated_amount: line.amount.unwrap_or(0.0),
                    employee_contribution: line.employee_contribution,
                    employer_contribution: line.employer_contribution,
                    ..Default::default()
                },
                serde_json::to_string(line)?,
            )?;
            stored += 1;
        }

        for line in &payslip.leave_accrual_lines {
            insert_line(
                "leave_accrual",
                LineValues {
                    display_name: Some("Leave Accrual".into()),
                    auto_calculate: line.auto_calculate.unwrap_or(false),
                    leave_type_id: line.leave_type_id.clone(),
                    leave_units: line.number_of_units,
                    ..Default::default()
                },
                serde_json::to_string(line)?,
            )?;
            stored += 1;
        }

        for line in &payslip.statutory_deduction_lines {
            insert_line(
                "statutory_deduction",
                LineValues {
                    line_type_id: line.statutory_deduction_type_id.clone(),
                    display_name: line.display_name.clone(),
                    calculated_amount: line.amount.unwrap_or(0.0),
                    ..Default::default()
                },
                serde_json::to_string(line)?,
            )?;
            stored += 1;
        }
    }

    tracing::debug!(
        run_id = run_id,
        snapshot_id = snapshot_id,
        lines_stored = stored,
        payslips_skipped = skipped,
        "Stored provider payslip lines"
    );

    Ok(())
}
