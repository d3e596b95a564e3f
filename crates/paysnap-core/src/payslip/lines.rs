//! Plain line-item records per payslip category.
//!
//! Every field is optional: providers omit accessors freely, and the
//! adapter maps each missing value to an explicit null.

use serde::{Deserialize, Serialize};

/// Ordinary hours, overtime, bonuses and other earnings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EarningsLine {
    pub earnings_rate_id: Option<String>,
    pub display_name: Option<String>,
    pub rate_per_unit: Option<f64>,
    pub number_of_units: Option<f64>,
    pub fixed_amount: Option<f64>,
    pub amount: Option<f64>,
    pub is_linked_to_timesheet: Option<bool>,
    pub is_average_daily_pay_rate: Option<bool>,
}

/// Account payments and other deductions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionLine {
    pub deduction_type_id: Option<String>,
    pub display_name: Option<String>,
    pub amount: Option<f64>,
    pub percentage: Option<f64>,
}

/// Annual leave and sick leave paid out this period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveEarningsLine {
    pub earnings_rate_id: Option<String>,
    pub display_name: Option<String>,
    pub rate_per_unit: Option<f64>,
    pub number_of_units: Option<f64>,
    pub fixed_amount: Option<f64>,
    pub amount: Option<f64>,
}

/// Expense reimbursements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReimbursementLine {
    pub reimbursement_type_id: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
}

/// Employee or employer tax line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxLine {
    pub tax_type_id: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub global_tax_type_id: Option<String>,
}

/// Retirement-scheme contributions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperannuationLine {
    pub superannuation_type_id: Option<String>,
    pub display_name: Option<String>,
    pub amount: Option<f64>,
    pub percentage: Option<f64>,
    pub employee_contribution: Option<f64>,
    pub employer_contribution: Option<f64>,
}

/// Leave balance accrued this period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveAccrualLine {
    pub leave_type_id: Option<String>,
    pub number_of_units: Option<f64>,
    pub auto_calculate: Option<bool>,
}

/// Court-ordered and other statutory deductions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatutoryDeductionLine {
    pub statutory_deduction_type_id: Option<String>,
    pub display_name: Option<String>,
    pub amount: Option<f64>,
}

/// Tax code configuration attached to the payslip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxSettings {
    pub tax_code: Option<String>,
    pub special_tax_rate: Option<f64>,
    pub lump_sum_tax_code: Option<String>,
    pub lump_sum_amount: Option<f64>,
}

/// Rolling gross-earnings figures used for averaged leave rates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GrossEarningsHistory {
    pub day_pay_gross_earnings: Option<f64>,
    pub week_pay_gross_earnings: Option<f64>,
}
