//! Flattening of provider payslips into plain records.

use crate::payslip::lines::{
    DeductionLine, EarningsLine, GrossEarningsHistory, LeaveAccrualLine, LeaveEarningsLine,
    ReimbursementLine, StatutoryDeductionLine, SuperannuationLine, TaxLine, TaxSettings,
};
use crate::payslip::source::PayslipSource;
use serde::{Deserialize, Serialize};

/// A fully flattened provider payslip.
///
/// This is the only payslip shape the engine hashes, stores, or
/// projects. SDK objects never cross the capture boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PayslipFlat {
    pub payslip_id: Option<String>,
    pub employee_id: Option<String>,
    pub pay_run_ref: Option<String>,

    pub period_start_date: Option<String>,
    pub period_end_date: Option<String>,
    pub payment_date: Option<String>,
    pub last_edited: Option<String>,

    pub earnings_lines: Vec<EarningsLine>,
    pub deduction_lines: Vec<DeductionLine>,
    pub leave_earnings_lines: Vec<LeaveEarningsLine>,
    pub reimbursement_lines: Vec<ReimbursementLine>,
    pub employee_tax_lines: Vec<TaxLine>,
    pub employer_tax_lines: Vec<TaxLine>,
    pub superannuation_lines: Vec<SuperannuationLine>,
    pub leave_accrual_lines: Vec<LeaveAccrualLine>,
    pub statutory_deduction_lines: Vec<StatutoryDeductionLine>,

    pub tax_settings: Option<TaxSettings>,
    pub gross_earnings_history: Option<GrossEarningsHistory>,
}

impl PayslipFlat {
    /// Flatten a single provider payslip.
    pub fn from_source<S: PayslipSource>(source: &S) -> Self {
        Self {
            payslip_id: source.payslip_id(),
            employee_id: source.employee_id(),
            pay_run_ref: source.pay_run_ref(),
            period_start_date: source.period_start_date(),
            period_end_date: source.period_end_date(),
            payment_date: source.payment_date(),
            last_edited: source.last_edited(),
            earnings_lines: source.earnings_lines(),
            deduction_lines: source.deduction_lines(),
            leave_earnings_lines: source.leave_earnings_lines(),
            reimbursement_lines: source.reimbursement_lines(),
            employee_tax_lines: source.employee_tax_lines(),
            employer_tax_lines: source.employer_tax_lines(),
            superannuation_lines: source.superannuation_lines(),
            leave_accrual_lines: source.leave_accrual_lines(),
            statutory_deduction_lines: source.statutory_deduction_lines(),
            tax_settings: source.tax_settings(),
            gross_earnings_history: source.gross_earnings_history(),
        }
    }
}

/// Flatten a batch of provider payslips in order.
pub fn adapt_payslips<S: PayslipSource>(sources: &[S]) -> Vec<PayslipFlat> {
    sources.iter().map(PayslipFlat::from_source).collect()
}
