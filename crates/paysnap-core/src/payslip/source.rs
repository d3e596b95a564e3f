//! Category interfaces implemented by provider integration layers.
//!
//! One small trait per line category. Every accessor has a default
//! implementation returning an empty collection (or `None`), so an
//! integration only implements the categories its provider exposes and
//! the rest degrade silently.

use crate::payslip::lines::{
    DeductionLine, EarningsLine, GrossEarningsHistory, LeaveAccrualLine, LeaveEarningsLine,
    ReimbursementLine, StatutoryDeductionLine, SuperannuationLine, TaxLine, TaxSettings,
};

/// Earnings lines (ordinary hours, overtime, bonuses).
pub trait EarningsSource {
    fn earnings_lines(&self) -> Vec<EarningsLine> {
        Vec::new()
    }
}

/// Deduction lines (account payments and similar).
pub trait DeductionsSource {
    fn deduction_lines(&self) -> Vec<DeductionLine> {
        Vec::new()
    }
}

/// Leave paid out this period.
pub trait LeaveEarningsSource {
    fn leave_earnings_lines(&self) -> Vec<LeaveEarningsLine> {
        Vec::new()
    }
}

/// Expense reimbursements.
pub trait ReimbursementsSource {
    fn reimbursement_lines(&self) -> Vec<ReimbursementLine> {
        Vec::new()
    }
}

/// Tax withheld from the employee.
pub trait EmployeeTaxSource {
    fn employee_tax_lines(&self) -> Vec<TaxLine> {
        Vec::new()
    }
}

/// Tax paid by the employer.
pub trait EmployerTaxSource {
    fn employer_tax_lines(&self) -> Vec<TaxLine> {
        Vec::new()
    }
}

/// Retirement-scheme contributions.
pub trait SuperannuationSource {
    fn superannuation_lines(&self) -> Vec<SuperannuationLine> {
        Vec::new()
    }
}

/// Leave balances accrued this period.
pub trait LeaveAccrualsSource {
    fn leave_accrual_lines(&self) -> Vec<LeaveAccrualLine> {
        Vec::new()
    }
}

/// Court-ordered and other statutory deductions.
pub trait StatutoryDeductionsSource {
    fn statutory_deduction_lines(&self) -> Vec<StatutoryDeductionLine> {
        Vec::new()
    }
}

/// Tax settings and gross-earnings history.
pub trait TaxSettingsSource {
    fn tax_settings(&self) -> Option<TaxSettings> {
        None
    }

    fn gross_earnings_history(&self) -> Option<GrossEarningsHistory> {
        None
    }
}

/// A provider payslip the adapter can flatten.
///
/// Identification accessors are the only required methods; all category
/// accessors inherit their empty defaults from the category traits.
pub trait PayslipSource:
    EarningsSource
    + DeductionsSource
    + LeaveEarningsSource
    + ReimbursementsSource
    + EmployeeTaxSource
    + EmployerTaxSource
    + SuperannuationSource
    + LeaveAccrualsSource
    + StatutoryDeductionsSource
    + TaxSettingsSource
{
    fn payslip_id(&self) -> Option<String>;
    fn employee_id(&self) -> Option<String>;

    fn pay_run_ref(&self) -> Option<String> {
        None
    }

    /// Period dates as `Y-m-d` strings
    fn period_start_date(&self) -> Option<String> {
        None
    }

    fn period_end_date(&self) -> Option<String> {
        None
    }

    fn payment_date(&self) -> Option<String> {
        None
    }

    fn last_edited(&self) -> Option<String> {
        None
    }
}
