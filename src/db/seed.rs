// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Demo marketplace data, loaded at startup when `SEED_DEMO_DATA` is set.
//!
//! Every demo account signs in with [`DEMO_PASSWORD`].

use chrono::{Duration, Utc};
use std::collections::HashMap;

use crate::db::MemoryDb;
use crate::error::{AppError, Result};
use crate::models::user::normalize_tags;
use crate::models::{ActivityEntry, RequestStatus, Skill, SkillCategory, SkillRequest, User};
use crate::services::password::hash_password;

pub const DEMO_PASSWORD: &str = "skillswap-demo";

/// (name, email)
const USERS: [(&str, &str); 8] = [
    ("Alex Ray", "alex@skillswap.dev"),
    ("Jane Doe", "jane@skillswap.dev"),
    ("John Smith", "john@skillswap.dev"),
    ("Maria Garcia", "maria@skillswap.dev"),
    ("Sam Wilson", "sam@skillswap.dev"),
    ("Chen Wei", "chen@skillswap.dev"),
    ("Anna Ivanova", "anna@skillswap.dev"),
    ("Tom Chen", "tom@skillswap.dev"),
];

/// (skill, category, offered by, wants in exchange, rating)
const SKILLS: [(&str, SkillCategory, &str, &str, Option<f32>); 11] = [
    ("React Development Basics", SkillCategory::Technology, "Jane Doe", "SEO Optimization", Some(4.8)),
    ("Public Speaking Coaching", SkillCategory::Business, "John Smith", "Video Editing", Some(4.9)),
    ("Beginner Guitar Lessons", SkillCategory::CreativeArts, "Maria Garcia", "Content Writing", Some(5.0)),
    ("Sourdough Bread Making", SkillCategory::Lifestyle, "Sam Wilson", "Python Scripting", None),
    ("Digital Marketing 101", SkillCategory::Business, "Chen Wei", "Graphic Design", None),
    ("Introduction to Photoshop", SkillCategory::CreativeArts, "Anna Ivanova", "Social Media Mngmt", None),
    ("Advanced CSS Grid", SkillCategory::Technology, "Alex Ray", "UX Design", Some(4.5)),
    ("React State Management", SkillCategory::Technology, "Alex Ray", "Copywriting", None),
    ("React Development", SkillCategory::Technology, "Jane Doe", "SEO Optimization", Some(4.8)),
    ("React Development", SkillCategory::Technology, "Alex Ray", "Copywriting", Some(4.5)),
    ("Guitar Lessons", SkillCategory::CreativeArts, "Tom Chen", "Video Editing", Some(4.2)),
];

/// (requester, skill, status)
const REQUESTS: [(&str, &str, RequestStatus); 6] = [
    ("Alex Ray", "Public Speaking Coaching", RequestStatus::Pending),
    ("Alex Ray", "Beginner Guitar Lessons", RequestStatus::Accepted),
    ("Alex Ray", "Sourdough Bread Making", RequestStatus::Declined),
    ("Jane Doe", "Advanced CSS Grid", RequestStatus::Pending),
    ("Sam Wilson", "Advanced CSS Grid", RequestStatus::Pending),
    ("Chen Wei", "React State Management", RequestStatus::Pending),
];

/// (user, text, hours ago)
const ACTIVITY: [(&str, &str, i64); 3] = [
    ("Alex Ray", "You sent a request for \"Sourdough Bread Making\".", 48),
    ("Alex Ray", "You received a new request for \"Advanced CSS Grid\".", 24),
    ("Alex Ray", "Your request for \"Beginner Guitar Lessons\" was accepted.", 2),
];

/// What [`load_demo_data`] inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub skills: usize,
    pub requests: usize,
}

fn missing(what: &str, name: &str) -> AppError {
    AppError::Internal(anyhow::anyhow!("Demo data refers to unknown {what} '{name}'"))
}

/// Insert the demo users, skills, requests and activity.
pub fn load_demo_data(db: &MemoryDb, iterations: u32) -> Result<SeedSummary> {
    let password_hash = hash_password(DEMO_PASSWORD, iterations)?;
    let now = Utc::now();

    let mut users: HashMap<&str, User> = HashMap::new();
    for (name, email) in USERS {
        let mut user = User::new(db.next_id(), name, email, password_hash.clone());
        user.skills_to_teach = normalize_tags(
            SKILLS
                .iter()
                .filter(|(_, _, owner, _, _)| *owner == name)
                .map(|(skill, ..)| *skill),
        );
        user.skills_to_learn = normalize_tags(
            SKILLS
                .iter()
                .filter(|(_, _, owner, _, _)| *owner == name)
                .map(|(_, _, _, wants, _)| *wants),
        );
        db.insert_user(user.clone())?;
        users.insert(name, user);
    }

    let mut skills: Vec<Skill> = Vec::new();
    for (name, category, owner, wants, rating) in SKILLS {
        let owner = users.get(owner).ok_or_else(|| missing("user", owner))?;
        let skill = Skill {
            id: db.next_id(),
            name: name.to_string(),
            category,
            offered_by: owner.id,
            offered_by_name: owner.name.clone(),
            wants_in_exchange: wants.to_string(),
            description: None,
            level: None,
            duration: None,
            rating,
            created_at: now.to_rfc3339(),
        };
        db.insert_skill(skill.clone());
        skills.push(skill);
    }

    for (requester, skill_name, status) in REQUESTS {
        let requester = users
            .get(requester)
            .ok_or_else(|| missing("user", requester))?;
        let skill = skills
            .iter()
            .find(|s| s.name == skill_name)
            .ok_or_else(|| missing("skill", skill_name))?;
        db.insert_request(SkillRequest {
            id: db.next_id(),
            skill_id: skill.id,
            skill_name: skill.name.clone(),
            requester_id: requester.id,
            requester_name: requester.name.clone(),
            owner_id: skill.offered_by,
            owner_name: skill.offered_by_name.clone(),
            status,
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
        })?;
    }

    for (name, text, hours_ago) in ACTIVITY {
        let user = users.get(name).ok_or_else(|| missing("user", name))?;
        db.insert_activity(ActivityEntry {
            id: db.next_id(),
            user_id: user.id,
            text: text.to_string(),
            created_at: now - Duration::hours(hours_ago),
        });
    }

    Ok(SeedSummary {
        users: USERS.len(),
        skills: SKILLS.len(),
        requests: REQUESTS.len(),
    })
}
