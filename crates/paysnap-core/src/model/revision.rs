use serde::{Deserialize, Serialize};

/// Who performed a mutating action, and from where.
///
/// Attached to every revision row. All fields are optional: headless
/// automation has no IP or user agent, and system-triggered actions have
/// no actor id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActorContext {
    pub actor_id: Option<i64>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ActorContext {
    /// Context for an identified user with no request metadata
    pub fn user(actor_id: i64) -> Self {
        Self {
            actor_id: Some(actor_id),
            ip_address: None,
            user_agent: None,
        }
    }

    /// Context for a system-triggered action
    pub fn system() -> Self {
        Self::default()
    }
}
