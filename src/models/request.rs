//! Skill exchange request model.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Status of an exchange request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl RequestStatus {
    /// Only pending requests can be answered, and only with a final status.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        self == RequestStatus::Pending && next != RequestStatus::Pending
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Declined => "Declined",
        };
        f.write_str(label)
    }
}

/// A request by one user to learn a skill offered by another.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SkillRequest {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub skill_id: u64,
    pub skill_name: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub requester_id: u64,
    pub requester_name: String,
    /// Skill owner, the only user who may answer
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub owner_id: u64,
    pub owner_name: String,
    pub status: RequestStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use RequestStatus::*;
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Declined));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Accepted.can_transition_to(Declined));
        assert!(!Declined.can_transition_to(Accepted));
        assert!(!Accepted.can_transition_to(Accepted));
    }
}
