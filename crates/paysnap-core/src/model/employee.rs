//! Loosely-typed employee state records.
//!
//! Upstream processing hands the engine one record per employee per run.
//! The shape is not fully fixed across callers, so every field carries a
//! default: numeric fields default to zero, optional identifiers to `None`,
//! and child line collections to empty. The engine never rejects a record
//! for a missing field.

use serde::{Deserialize, Serialize};

fn default_processing_status() -> String {
    "pending".to_string()
}

fn default_calculated() -> String {
    "calculated".to_string()
}

fn default_automatic() -> String {
    "automatic".to_string()
}

fn default_day_in_lieu() -> String {
    "day_in_lieu".to_string()
}

/// Full per-employee state considered during a pay run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeRecord {
    /// Stable internal employee identifier; diff identity key
    pub user_id: i64,
    pub name: String,
    pub email: Option<String>,

    // External system identifiers
    pub external_employee_id: Option<String>,
    pub external_payslip_id: Option<String>,
    pub deputy_employee_id: Option<i64>,
    pub vend_customer_id: Option<String>,

    // Hours
    pub total_hours: f64,
    pub ordinary_hours: f64,
    pub overtime_hours: f64,
    pub leave_hours: f64,
    pub public_holiday_hours: f64,

    // Pay components
    pub base_pay: f64,
    pub overtime_pay: f64,
    pub commission: f64,
    pub monthly_bonus: f64,
    pub google_review_bonus: f64,
    pub vape_drops_bonus: f64,
    pub other_bonuses: f64,
    pub leave_pay: f64,
    pub public_holiday_pay: f64,
    pub gross_earnings: f64,

    // Deductions
    pub account_payment_deduction: f64,
    pub other_deductions: f64,
    pub total_deductions: f64,
    pub net_pay: f64,

    // Rates
    pub hourly_rate: Option<f64>,
    pub salary_annual: Option<f64>,

    // Upstream account state
    pub vend_account_balance: Option<f64>,
    pub deputy_timesheet_count: i64,
    pub deputy_first_punch: Option<String>,
    pub deputy_last_punch: Option<String>,

    // Public holiday handling
    pub public_holiday_preference: Option<String>,
    pub alternative_holiday_created: bool,
    pub alternative_holiday_hours: Option<f64>,

    // Processing outcome
    #[serde(default = "default_processing_status")]
    pub processing_status: String,
    pub skip_reason: Option<String>,
    pub error_message: Option<String>,

    // Child line items
    pub earning_lines: Vec<EarningLineRecord>,
    pub deduction_lines: Vec<DeductionLineRecord>,
    pub public_holiday_info: Vec<PublicHolidayRecord>,
}

/// One earning line item under an employee record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EarningLineRecord {
    #[serde(rename = "type")]
    pub line_type: String,
    pub rate_id: Option<String>,
    pub rate_name: Option<String>,
    pub units: Option<f64>,
    pub rate_per_unit: Option<f64>,
    pub fixed_amount: Option<f64>,
    pub total: f64,
    pub is_leave: bool,
    pub is_overtime: bool,
    pub is_bonus: bool,
    pub is_public_holiday: bool,
    #[serde(default = "default_calculated")]
    pub source: String,
    pub source_ref: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// One deduction line item under an employee record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeductionLineRecord {
    #[serde(rename = "type")]
    pub line_type: String,
    pub code: Option<String>,
    pub name: Option<String>,
    pub amount: f64,
    pub vend_customer_id: Option<String>,
    pub vend_payment_id: Option<String>,
    #[serde(default = "default_processing_status")]
    pub allocation_status: String,
    pub allocated_at: Option<String>,
    pub allocation_error: Option<String>,
    #[serde(default = "default_automatic")]
    pub source: String,
    pub source_ref: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Per-holiday detail for an employee who intersects a public holiday.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicHolidayRecord {
    pub date: Option<String>,
    pub name: Option<String>,
    pub hours_worked: Option<f64>,
    #[serde(default = "default_day_in_lieu")]
    pub preference: String,
    pub earnings_zeroed: bool,
    pub alternative_holiday_created: bool,
    pub leave_hours_granted: Option<f64>,
    pub external_leave_id: Option<String>,
    pub ordinary_pay_removed: Option<f64>,
    pub public_holiday_rate_applied: bool,
    pub total_pay_impact: Option<f64>,
    pub notes: Option<String>,
}

impl PublicHolidayRecord {
    /// A holiday counts as worked when any hours were logged against it
    pub fn worked(&self) -> bool {
        self.hours_worked.map(|h| h > 0.0).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_defaults_every_field() {
        let record: EmployeeRecord =
            serde_json::from_str(r#"{"userId": 1, "name": "A"}"#).unwrap();
        assert_eq!(record.user_id, 1);
        assert_eq!(record.gross_earnings, 0.0);
        assert_eq!(record.net_pay, 0.0);
        assert!(record.hourly_rate.is_none());
        assert_eq!(record.processing_status, "pending");
        assert!(record.earning_lines.is_empty());
    }

    #[test]
    fn test_earning_line_type_tag_round_trip() {
        let line: EarningLineRecord =
            serde_json::from_str(r#"{"type": "ordinary", "total": 800.0}"#).unwrap();
        assert_eq!(line.line_type, "ordinary");
        assert_eq!(line.source, "calculated");
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains(r#""type":"ordinary""#));
    }

    #[test]
    fn test_holiday_worked_requires_positive_hours() {
        let mut holiday = PublicHolidayRecord::default();
        assert!(!holiday.worked());
        holiday.hours_worked = Some(0.0);
        assert!(!holiday.worked());
        holiday.hours_worked = Some(7.5);
        assert!(holiday.worked());
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        // Upstream callers may attach fields this engine does not track.
        let record: EmployeeRecord = serde_json::from_str(
            r#"{"userId": 2, "name": "B", "legacyFlag": true, "grossEarnings": 1200.5}"#,
        )
        .unwrap();
        assert_eq!(record.gross_earnings, 1200.5);
    }
}
