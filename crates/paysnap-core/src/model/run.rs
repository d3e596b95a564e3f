use crate::errors::DomainError;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a pay run.
///
/// Status is only ever mutated through the run manager. `Posted` and
/// `Completed` additionally stamp completion metadata on the run row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Draft,
    Loaded,
    Calculated,
    Posted,
    Completed,
    Amended,
}

impl RunStatus {
    /// Stable string tag as stored in the runs table
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Draft => "draft",
            RunStatus::Loaded => "loaded",
            RunStatus::Calculated => "calculated",
            RunStatus::Posted => "posted",
            RunStatus::Completed => "completed",
            RunStatus::Amended => "amended",
        }
    }

    /// Parse a stored tag back into a status
    pub fn parse(tag: &str) -> Result<Self, DomainError> {
        match tag {
            "draft" => Ok(RunStatus::Draft),
            "loaded" => Ok(RunStatus::Loaded),
            "calculated" => Ok(RunStatus::Calculated),
            "posted" => Ok(RunStatus::Posted),
            "completed" => Ok(RunStatus::Completed),
            "amended" => Ok(RunStatus::Amended),
            other => Err(DomainError::InvalidTag {
                what: "run status".into(),
                value: other.into(),
            }),
        }
    }

    /// Whether entering this status stamps completion metadata on the run
    pub fn stamps_completion(&self) -> bool {
        matches!(self, RunStatus::Posted | RunStatus::Completed)
    }
}
