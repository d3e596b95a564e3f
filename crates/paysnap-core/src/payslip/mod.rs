//! Provider payslip adapter.
//!
//! External payroll providers expose payslips through SDK objects with
//! one accessor per line category. The adapter flattens them into plain
//! [`PayslipFlat`] records before anything is hashed or stored. The core
//! never probes for method existence: each category is a small trait the
//! integration layer implements, and every category accessor has a
//! default implementation returning nothing, so an absent category
//! degrades to an empty list rather than an error.

pub mod adapter;
pub mod lines;
pub mod source;

pub use adapter::{adapt_payslips, PayslipFlat};
pub use lines::{
    DeductionLine, EarningsLine, GrossEarningsHistory, LeaveAccrualLine, LeaveEarningsLine,
    ReimbursementLine, StatutoryDeductionLine, SuperannuationLine, TaxLine, TaxSettings,
};
pub use source::PayslipSource;
