use serde::{Deserialize, Serialize};

/// Explicit configuration state captured with every snapshot.
///
/// The caller assembles this value; the engine never reads ambient
/// environment or global constants at capture time. It is serialized as
/// the final domain of the content hash, so two captures with differing
/// configuration hash differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// Version of the engine performing the capture
    pub engine_version: String,

    /// External payroll-provider tenant the run belongs to
    pub tenant_id: String,

    /// RFC3339 timestamp supplied by the caller
    pub captured_at: String,

    /// Whether the run is executing in dry-run mode
    #[serde(default)]
    pub dry_run: bool,

    /// Provider leave type used for alternative-holiday grants
    #[serde(default)]
    pub alternative_holiday_leave_type_id: Option<String>,

    /// Provider deduction type used for account payments
    #[serde(default)]
    pub account_payment_deduction_type_id: Option<String>,
}
