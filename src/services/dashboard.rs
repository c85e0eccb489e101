// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard summary for the signed-in user.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::MemoryDb;
use crate::error::{AppError, Result};
use crate::models::{ActivityView, RequestStatus, SkillRequest};

/// Number of feed entries shown on the dashboard.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// One of the user's own skills, with how many requests it drew.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OfferedSkillSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    pub wants_in_exchange: String,
    pub requests: u32,
}

/// Request counts by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RequestCounts {
    pub pending: u32,
    pub accepted: u32,
    pub declined: u32,
}

impl RequestCounts {
    fn tally<'a>(requests: impl IntoIterator<Item = &'a SkillRequest>) -> Self {
        let mut counts = Self::default();
        for request in requests {
            match request.status {
                RequestStatus::Pending => counts.pending += 1,
                RequestStatus::Accepted => counts.accepted += 1,
                RequestStatus::Declined => counts.declined += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    pub name: String,
    pub avatar_url: String,
    pub profile_completion: u8,
    pub offered_skills: Vec<OfferedSkillSummary>,
    /// Requests the user has sent
    pub requested_skills: Vec<SkillRequest>,
    /// Counts over the requests the user has sent
    pub outgoing: RequestCounts,
    /// Counts over the requests the user has received
    pub incoming: RequestCounts,
    pub recent_activity: Vec<ActivityView>,
}

/// Assemble the dashboard for a user.
pub fn summary(db: &MemoryDb, user_id: u64) -> Result<DashboardResponse> {
    let user = db
        .get_user(user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    let incoming = db.list_requests(|r| r.owner_id == user_id);
    let outgoing = db.list_requests(|r| r.requester_id == user_id);

    let offered_skills = db
        .skills_by_owner(user_id)
        .into_iter()
        .map(|skill| OfferedSkillSummary {
            requests: incoming.iter().filter(|r| r.skill_id == skill.id).count() as u32,
            id: skill.id,
            name: skill.name,
            wants_in_exchange: skill.wants_in_exchange,
        })
        .collect();

    let now = chrono::Utc::now();
    let recent_activity = db
        .activity_for_user(user_id, RECENT_ACTIVITY_LIMIT)
        .iter()
        .map(|e| e.to_view(now))
        .collect();

    Ok(DashboardResponse {
        profile_completion: user.profile_completion(),
        name: user.name,
        avatar_url: user.avatar_url,
        offered_skills,
        outgoing: RequestCounts::tally(&outgoing),
        incoming: RequestCounts::tally(&incoming),
        requested_skills: outgoing,
        recent_activity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::AuthUser;
    use crate::models::{SkillCategory, User};
    use crate::services::exchange::{offer_skill, respond, send_request, SkillOffer};

    fn user(db: &MemoryDb, name: &str) -> AuthUser {
        let user = User::new(
            db.next_id(),
            name,
            &format!("{name}@example.com"),
            String::new(),
        );
        let auth = AuthUser {
            user_id: user.id,
            name: user.name.clone(),
        };
        db.insert_user(user).unwrap();
        auth
    }

    fn offer(name: &str) -> SkillOffer {
        SkillOffer {
            name: name.to_string(),
            category: SkillCategory::Technology,
            wants_in_exchange: "UX Design".to_string(),
            description: None,
            level: None,
            duration: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let db = MemoryDb::new();
        let alex = user(&db, "alex");
        let jane = user(&db, "jane");
        let sam = user(&db, "sam");

        let css = offer_skill(&db, &alex, offer("Advanced CSS Grid")).unwrap();
        let react = offer_skill(&db, &jane, offer("React Development")).unwrap();

        send_request(&db, &jane, css.id).unwrap();
        let from_sam = send_request(&db, &sam, css.id).unwrap();
        respond(&db, alex.user_id, from_sam.id, RequestStatus::Accepted).unwrap();
        send_request(&db, &alex, react.id).unwrap();

        let dashboard = summary(&db, alex.user_id).unwrap();
        assert_eq!(dashboard.offered_skills.len(), 1);
        assert_eq!(dashboard.offered_skills[0].requests, 2);
        assert_eq!(
            dashboard.incoming,
            RequestCounts {
                pending: 1,
                accepted: 1,
                declined: 0
            }
        );
        assert_eq!(dashboard.outgoing.pending, 1);
        assert_eq!(dashboard.requested_skills.len(), 1);
        assert_eq!(dashboard.requested_skills[0].skill_name, "React Development");
        assert!(!dashboard.recent_activity.is_empty());
        assert!(dashboard.recent_activity.len() <= RECENT_ACTIVITY_LIMIT);
    }

    #[test]
    fn test_summary_missing_user() {
        let db = MemoryDb::new();
        assert!(matches!(summary(&db, 5), Err(AppError::NotFound(_))));
    }
}
