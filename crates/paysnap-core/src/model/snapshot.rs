use crate::errors::DomainError;
use serde::{Deserialize, Serialize};

/// Kind of snapshot being captured.
///
/// Records the point in the run lifecycle at which the capture happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotType {
    PreLoad,
    PrePush,
    PostPush,
    Amendment,
    Manual,
}

impl SnapshotType {
    /// Stable string tag as stored in the snapshots table
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotType::PreLoad => "pre_load",
            SnapshotType::PrePush => "pre_push",
            SnapshotType::PostPush => "post_push",
            SnapshotType::Amendment => "amendment",
            SnapshotType::Manual => "manual",
        }
    }

    /// Parse a stored tag back into a snapshot type
    pub fn parse(tag: &str) -> Result<Self, DomainError> {
        match tag {
            "pre_load" => Ok(SnapshotType::PreLoad),
            "pre_push" => Ok(SnapshotType::PrePush),
            "post_push" => Ok(SnapshotType::PostPush),
            "amendment" => Ok(SnapshotType::Amendment),
            "manual" => Ok(SnapshotType::Manual),
            other => Err(DomainError::InvalidTag {
                what: "snapshot type".into(),
                value: other.into(),
            }),
        }
    }
}
