//! Domain payloads and their canonical blob encoding.

use crate::errors::Result;
use crate::model::{ConfigSnapshot, EmployeeRecord};
use crate::payslip::PayslipFlat;
use serde_json::Value;

/// Fixed hash order of the snapshot domains.
///
/// The content hash concatenates the serialized domains in exactly this
/// order, with an empty string standing in for each absent domain.
/// Changing this order would silently change the meaning of every
/// historical hash, so it is frozen for the lifetime of the system.
pub const HASH_DOMAIN_ORDER: [&str; 9] = [
    "employees",
    "deputy_timesheets",
    "vend_balances",
    "payslips",
    "external_employees",
    "public_holidays",
    "bonus_calculations",
    "amendments",
    "config",
];

/// Borrowed view of everything a caller hands to a snapshot capture.
///
/// Employee records and provider payslips are typed; the remaining
/// domains are raw upstream API responses carried as opaque JSON.
#[derive(Debug, Clone, Copy)]
pub struct DomainPayload<'a> {
    pub employees: &'a [EmployeeRecord],
    pub deputy_timesheets: Option<&'a Value>,
    pub vend_balances: Option<&'a Value>,
    pub payslips: Option<&'a [PayslipFlat]>,
    pub external_employees: Option<&'a Value>,
    pub public_holidays: Option<&'a Value>,
    pub bonus_calculations: Option<&'a Value>,
    pub amendments: Option<&'a Value>,
    pub config: &'a ConfigSnapshot,
}

/// Serialized snapshot domains, ready for hashing and storage.
///
/// `employees` and `config` are always present; the other domains are
/// `None` when the caller did not supply them, and hash as "".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainBlobs {
    pub employees: String,
    pub deputy_timesheets: Option<String>,
    pub vend_balances: Option<String>,
    pub payslips: Option<String>,
    pub external_employees: Option<String>,
    pub public_holidays: Option<String>,
    pub bonus_calculations: Option<String>,
    pub amendments: Option<String>,
    pub config: String,
}

impl DomainBlobs {
    /// Canonically serialize a payload into one blob per domain.
    ///
    /// Serialization is deterministic: struct fields serialize in
    /// declaration order and `serde_json::Value` maps are key-ordered,
    /// so identical inputs always produce identical blobs.
    ///
    /// # Errors
    ///
    /// Returns a `Serialization` error if any domain fails to encode.
    pub fn encode(payload: &DomainPayload<'_>) -> Result<Self> {
        Ok(Self {
            employees: serde_json::to_string(payload.employees)?,
            deputy_timesheets: encode_opt(payload.deputy_timesheets)?,
            vend_balances: encode_opt(payload.vend_balances)?,
            payslips: payload
                .payslips
                .map(serde_json::to_string)
                .transpose()?,
            external_employees: encode_opt(payload.external_employees)?,
            public_holidays: encode_opt(payload.public_holidays)?,
            bonus_calculations: encode_opt(payload.bonus_calculations)?,
            amendments: encode_opt(payload.amendments)?,
            config: serde_json::to_string(payload.config)?,
        })
    }

    /// Blobs in hash order, absent domains as "".
    pub fn ordered(&self) -> [&str; 9] {
        [
            &self.employees,
            opt_str(&self.deputy_timesheets),
            opt_str(&self.vend_balances),
            opt_str(&self.payslips),
            opt_str(&self.external_employees),
            opt_str(&self.public_holidays),
            opt_str(&self.bonus_calculations),
            opt_str(&self.amendments),
            &self.config,
        ]
    }

    /// SHA-256 content hash over the fixed-order concatenation.
    pub fn content_hash(&self) -> String {
        super::digest::content_hash(self)
    }

    /// Sum of the byte lengths of all present blobs.
    pub fn total_size_bytes(&self) -> i64 {
        self.ordered().iter().map(|blob| blob.len() as i64).sum()
    }
}

fn encode_opt(value: Option<&Value>) -> Result<Option<String>> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(Into::into)
}

fn opt_str(blob: &Option<String>) -> &str {
    blob.as_deref().unwrap_or("")
}
