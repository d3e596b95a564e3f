use crate::errors::DomainError;
use serde::{Deserialize, Serialize};

/// Approval state of a manual amendment.
///
/// `Approved` and `Rejected` are terminal: there is no transition back to
/// `Pending` once an amendment has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Stable string tag as stored in the amendments table
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }

    /// Parse a stored tag back into an approval status
    pub fn parse(tag: &str) -> Result<Self, DomainError> {
        match tag {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            other => Err(DomainError::InvalidTag {
                what: "approval status".into(),
                value: other.into(),
            }),
        }
    }

    /// Whether this state admits no further transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApprovalStatus::Pending)
    }
}
