// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store with typed operations.
//!
//! Provides operations for:
//! - Users (accounts, with a unique email index)
//! - Skills (offered listings)
//! - Requests (exchange requests, with a pending-request index)
//! - Activity (per-user feed entries)
//!
//! Every mutation runs under a single shard lock; no guard is held while
//! another entry of the same map is touched.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{ActivityEntry, RequestStatus, Skill, SkillRequest, User};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// In-memory database handle. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryDb {
    users: Arc<DashMap<u64, User>>,
    /// Lowercase email -> user ID
    emails: Arc<DashMap<String, u64>>,
    skills: Arc<DashMap<u64, Skill>>,
    requests: Arc<DashMap<u64, SkillRequest>>,
    /// (requester ID, skill ID) -> pending request ID
    pending: Arc<DashMap<(u64, u64), u64>>,
    activity: Arc<DashMap<u64, ActivityEntry>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new ID. IDs are shared across collections and increase
    /// monotonically, so sorting by ID gives insertion order.
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn not_found(collection: &str, id: u64) -> AppError {
        AppError::NotFound(format!("{} {} not found", collection, id))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Insert a new user, reserving its email atomically.
    pub fn insert_user(&self, user: User) -> Result<(), AppError> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::Conflict(
                    "Failed to create account. The email might already be in use.".to_string(),
                ))
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    pub fn get_user(&self, user_id: u64) -> Option<User> {
        self.users.get(&user_id).map(|u| u.clone())
    }

    /// Look up a user by (already normalized) email.
    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let user_id = *self.emails.get(email)?;
        self.get_user(user_id)
    }

    /// Mutate a user in place and return the closure's result.
    pub fn update_user<T>(
        &self,
        user_id: u64,
        f: impl FnOnce(&mut User) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| Self::not_found(collections::USERS, user_id))?;
        f(user.value_mut())
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    // ─── Skill Operations ────────────────────────────────────────

    pub fn insert_skill(&self, skill: Skill) {
        self.skills.insert(skill.id, skill);
    }

    pub fn get_skill(&self, skill_id: u64) -> Option<Skill> {
        self.skills.get(&skill_id).map(|s| s.clone())
    }

    /// All skills in listing order.
    pub fn list_skills(&self) -> Vec<Skill> {
        let mut skills: Vec<Skill> = self.skills.iter().map(|s| s.clone()).collect();
        skills.sort_by_key(|s| s.id);
        skills
    }

    pub fn skills_by_owner(&self, owner_id: u64) -> Vec<Skill> {
        let mut skills: Vec<Skill> = self
            .skills
            .iter()
            .filter(|s| s.offered_by == owner_id)
            .map(|s| s.clone())
            .collect();
        skills.sort_by_key(|s| s.id);
        skills
    }

    pub fn update_skill<T>(
        &self,
        skill_id: u64,
        f: impl FnOnce(&mut Skill) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut skill = self
            .skills
            .get_mut(&skill_id)
            .ok_or_else(|| Self::not_found(collections::SKILLS, skill_id))?;
        f(skill.value_mut())
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn delete_skill(&self, skill_id: u64) -> Option<Skill> {
        self.skills.remove(&skill_id).map(|(_, skill)| skill)
    }

    // ─── Request Operations ──────────────────────────────────────

    /// Insert a pending request unless the requester already has one
    /// pending for the same skill.
    pub fn insert_request(&self, request: SkillRequest) -> Result<(), AppError> {
        if request.status == RequestStatus::Pending {
            match self.pending.entry((request.requester_id, request.skill_id)) {
                Entry::Occupied(_) => {
                    return Err(AppError::Conflict(format!(
                        "You already have a pending request for '{}'",
                        request.skill_name
                    )))
                }
                Entry::Vacant(slot) => {
                    slot.insert(request.id);
                }
            }
        }
        self.requests.insert(request.id, request);
        Ok(())
    }

    pub fn get_request(&self, request_id: u64) -> Option<SkillRequest> {
        self.requests.get(&request_id).map(|r| r.clone())
    }

    /// Mutate a request in place. The pending index follows the new status.
    pub fn update_request<T>(
        &self,
        request_id: u64,
        f: impl FnOnce(&mut SkillRequest) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let (result, key, still_pending) = {
            let mut request = self
                .requests
                .get_mut(&request_id)
                .ok_or_else(|| Self::not_found(collections::REQUESTS, request_id))?;
            let result = f(request.value_mut())?;
            (
                result,
                (request.requester_id, request.skill_id),
                request.status == RequestStatus::Pending,
            )
        };
        if !still_pending {
            self.pending.remove_if(&key, |_, id| *id == request_id);
        }
        Ok(result)
    }

    /// Requests matching a predicate, newest first.
    pub fn list_requests(&self, pred: impl Fn(&SkillRequest) -> bool) -> Vec<SkillRequest> {
        let mut requests: Vec<SkillRequest> = self
            .requests
            .iter()
            .filter(|r| pred(r.value()))
            .map(|r| r.clone())
            .collect();
        requests.sort_by(|a, b| b.id.cmp(&a.id));
        requests
    }

    // ─── Activity Operations ─────────────────────────────────────

    pub fn append_activity(&self, user_id: u64, text: impl Into<String>) -> ActivityEntry {
        let entry = ActivityEntry {
            id: self.next_id(),
            user_id,
            text: text.into(),
            created_at: chrono::Utc::now(),
        };
        self.activity.insert(entry.id, entry.clone());
        entry
    }

    /// Insert an entry with an explicit timestamp (demo data).
    pub fn insert_activity(&self, entry: ActivityEntry) {
        self.activity.insert(entry.id, entry);
    }

    /// A user's feed, newest first.
    pub fn activity_for_user(&self, user_id: u64, limit: usize) -> Vec<ActivityEntry> {
        let mut entries: Vec<ActivityEntry> = self
            .activity
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.clone())
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        entries.truncate(limit);
        entries
    }
}
