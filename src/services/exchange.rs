// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exchange service: offering skills and the request workflow.
//!
//! Handles the core workflow:
//! 1. A user offers a skill (with what they want in exchange)
//! 2. Another user sends a request to learn it
//! 3. The owner accepts or declines the pending request
//!
//! Each step appends to the affected users' activity feeds.

use serde::Deserialize;
use validator::Validate;

use crate::db::MemoryDb;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::user::add_tag;
use crate::models::{RequestStatus, Skill, SkillCategory, SkillLevel, SkillRequest};

/// New skill offer.
#[derive(Debug, Deserialize, Validate)]
pub struct SkillOffer {
    #[validate(length(min = 1, max = 100, message = "Skill name is required (max 100 characters)"))]
    pub name: String,
    pub category: SkillCategory,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Wanted-in-exchange is required (max 100 characters)"
    ))]
    pub wants_in_exchange: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    pub level: Option<SkillLevel>,
    #[validate(length(max = 50, message = "Duration must be at most 50 characters"))]
    pub duration: Option<String>,
}

/// Partial edit of an offered skill.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SkillUpdate {
    #[validate(length(min = 1, max = 100, message = "Skill name is required (max 100 characters)"))]
    pub name: Option<String>,
    pub category: Option<SkillCategory>,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Wanted-in-exchange is required (max 100 characters)"
    ))]
    pub wants_in_exchange: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    pub level: Option<SkillLevel>,
    #[validate(length(max = 50, message = "Duration must be at most 50 characters"))]
    pub duration: Option<String>,
}

/// Which side of a request the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// Reject text that is empty once trimmed.
fn required(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Publish a new skill owned by `owner`. The name is also added to the
/// owner's teach tags.
pub fn offer_skill(db: &MemoryDb, owner: &AuthUser, offer: SkillOffer) -> Result<Skill> {
    offer.validate()?;
    let name = required(&offer.name, "Skill name")?;
    let wants_in_exchange = required(&offer.wants_in_exchange, "Wanted-in-exchange")?;

    let skill = Skill {
        id: db.next_id(),
        name,
        category: offer.category,
        offered_by: owner.user_id,
        offered_by_name: owner.name.clone(),
        wants_in_exchange,
        description: optional_text(offer.description),
        level: offer.level,
        duration: optional_text(offer.duration),
        rating: None,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    db.insert_skill(skill.clone());

    db.update_user(owner.user_id, |user| {
        add_tag(&mut user.skills_to_teach, &skill.name);
        Ok(())
    })?;
    db.append_activity(
        owner.user_id,
        format!("You offered \"{}\".", skill.name),
    );

    tracing::info!(user_id = owner.user_id, skill_id = skill.id, "Skill offered");
    Ok(skill)
}

/// Edit a skill; only its owner may.
pub fn update_skill(
    db: &MemoryDb,
    user_id: u64,
    skill_id: u64,
    update: SkillUpdate,
) -> Result<Skill> {
    update.validate()?;
    let name = update
        .name
        .as_deref()
        .map(|n| required(n, "Skill name"))
        .transpose()?;
    let wants_in_exchange = update
        .wants_in_exchange
        .as_deref()
        .map(|w| required(w, "Wanted-in-exchange"))
        .transpose()?;

    db.update_skill(skill_id, |skill| {
        if skill.offered_by != user_id {
            return Err(AppError::Forbidden(
                "Only the owner can edit this skill".to_string(),
            ));
        }
        if let Some(name) = name {
            skill.name = name;
        }
        if let Some(category) = update.category {
            skill.category = category;
        }
        if let Some(wants) = wants_in_exchange {
            skill.wants_in_exchange = wants;
        }
        if update.description.is_some() {
            skill.description = optional_text(update.description);
        }
        if let Some(level) = update.level {
            skill.level = Some(level);
        }
        if update.duration.is_some() {
            skill.duration = optional_text(update.duration);
        }
        Ok(skill.clone())
    })
}

/// Withdraw a skill; only its owner may. Pending requests for it are
/// declined.
pub fn delete_skill(db: &MemoryDb, user_id: u64, skill_id: u64) -> Result<()> {
    let skill = db
        .get_skill(skill_id)
        .ok_or_else(|| AppError::NotFound(format!("Skill {} not found", skill_id)))?;
    if skill.offered_by != user_id {
        return Err(AppError::Forbidden(
            "Only the owner can remove this skill".to_string(),
        ));
    }
    db.delete_skill(skill_id);

    let pending =
        db.list_requests(|r| r.skill_id == skill_id && r.status == RequestStatus::Pending);
    let mut declined = 0;
    for request in pending {
        // Answered since the listing above: leave it as the owner set it.
        if let Some(request) = decline_if_pending(db, request.id)? {
            db.append_activity(
                request.requester_id,
                format!("Your request for \"{}\" was declined.", request.skill_name),
            );
            declined += 1;
        }
    }

    tracing::info!(user_id, skill_id, requests_declined = declined, "Skill removed");
    Ok(())
}

/// Decline a request if it is still pending, without an ownership check.
/// Returns the updated request, or `None` when it was already answered.
pub(crate) fn decline_if_pending(db: &MemoryDb, request_id: u64) -> Result<Option<SkillRequest>> {
    db.update_request(request_id, |request| {
        if !request.status.can_transition_to(RequestStatus::Declined) {
            return Ok(None);
        }
        request.status = RequestStatus::Declined;
        request.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(Some(request.clone()))
    })
}

/// Ask to learn a skill.
pub fn send_request(db: &MemoryDb, requester: &AuthUser, skill_id: u64) -> Result<SkillRequest> {
    let skill = db
        .get_skill(skill_id)
        .ok_or_else(|| AppError::NotFound(format!("Skill {} not found", skill_id)))?;
    if skill.offered_by == requester.user_id {
        return Err(AppError::BadRequest(
            "You cannot request your own skill".to_string(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let request = SkillRequest {
        id: db.next_id(),
        skill_id,
        skill_name: skill.name.clone(),
        requester_id: requester.user_id,
        requester_name: requester.name.clone(),
        owner_id: skill.offered_by,
        owner_name: skill.offered_by_name.clone(),
        status: RequestStatus::Pending,
        created_at: now.clone(),
        updated_at: now,
    };
    db.insert_request(request.clone())?;

    db.append_activity(
        requester.user_id,
        format!("You sent a request for \"{}\".", skill.name),
    );
    db.append_activity(
        skill.offered_by,
        format!("You received a new request for \"{}\".", skill.name),
    );

    tracing::info!(
        requester_id = requester.user_id,
        skill_id,
        request_id = request.id,
        "Skill request sent"
    );
    Ok(request)
}

/// Accept or decline a pending request; only the skill owner may.
pub fn respond(
    db: &MemoryDb,
    user_id: u64,
    request_id: u64,
    status: RequestStatus,
) -> Result<SkillRequest> {
    if status == RequestStatus::Pending {
        return Err(AppError::BadRequest(
            "A request can only be accepted or declined".to_string(),
        ));
    }

    let updated = db.update_request(request_id, |request| {
        if request.owner_id != user_id {
            return Err(AppError::Forbidden(
                "Only the skill owner can answer this request".to_string(),
            ));
        }
        if !request.status.can_transition_to(status) {
            return Err(AppError::Conflict(format!(
                "Request is already {}",
                request.status
            )));
        }
        request.status = status;
        request.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(request.clone())
    })?;

    let verb = match status {
        RequestStatus::Accepted => "accepted",
        _ => "declined",
    };
    db.append_activity(
        updated.requester_id,
        format!("Your request for \"{}\" was {}.", updated.skill_name, verb),
    );

    tracing::info!(user_id, request_id, status = %status, "Skill request answered");
    Ok(updated)
}

/// Requests the user sent or received, newest first.
pub fn list_requests(
    db: &MemoryDb,
    user_id: u64,
    direction: Direction,
    status: Option<RequestStatus>,
) -> Vec<SkillRequest> {
    db.list_requests(|r| {
        let side = match direction {
            Direction::Outgoing => r.requester_id == user_id,
            Direction::Incoming => r.owner_id == user_id,
        };
        side && status.map_or(true, |s| r.status == s)
    })
}
