// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account service: registration, profile edits, password changes and
//! deactivation.

use serde::Deserialize;
use validator::Validate;

use crate::db::MemoryDb;
use crate::error::{AppError, Result};
use crate::models::user::{add_tag, normalize_tags, remove_tag};
use crate::models::{NotificationSettings, RequestStatus, User};
use crate::services::exchange::decline_if_pending;
use crate::services::password::{hash_password_blocking, verify_password_blocking};

/// Registration form.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Must equal `password`
    pub confirm_password: String,
}

/// Partial profile update. Absent fields are left unchanged; tag lists are
/// replaced wholesale.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 2, max = 30, message = "Username must be between 2 and 30 characters"))]
    pub username: Option<String>,
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: Option<String>,
    #[validate(length(max = 200, message = "Website must be at most 200 characters"))]
    pub website: Option<String>,
    #[validate(url(message = "Avatar must be a URL"))]
    pub avatar_url: Option<String>,
    pub skills_to_teach: Option<Vec<String>>,
    pub skills_to_learn: Option<Vec<String>>,
    pub is_location_public: Option<bool>,
    pub is_website_public: Option<bool>,
    pub notifications: Option<NotificationUpdate>,
}

/// Partial change to [`NotificationSettings`].
#[derive(Debug, Default, Deserialize)]
pub struct NotificationUpdate {
    pub skill_requests: Option<bool>,
    pub messages: Option<bool>,
    pub newsletter: Option<bool>,
}

impl NotificationUpdate {
    fn apply(self, settings: &mut NotificationSettings) {
        if let Some(flag) = self.skill_requests {
            settings.skill_requests = flag;
        }
        if let Some(flag) = self.messages {
            settings.messages = flag;
        }
        if let Some(flag) = self.newsletter {
            settings.newsletter = flag;
        }
    }
}

/// Password change form.
#[derive(Debug, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Minimum length for a new password, matching registration.
const MIN_PASSWORD_LEN: usize = 8;

fn trim_in_place(field: &mut Option<String>) {
    if let Some(value) = field {
        *value = value.trim().to_string();
    }
}

/// Create an account. Mismatched passwords are rejected before anything
/// is stored.
pub async fn register(db: &MemoryDb, iterations: u32, mut form: RegisterRequest) -> Result<User> {
    if form.password != form.confirm_password {
        return Err(AppError::BadRequest("Passwords do not match.".to_string()));
    }
    // Length limits apply to the name as stored.
    form.name = form.name.trim().to_string();
    form.email = form.email.trim().to_string();
    form.validate()?;

    let password_hash = hash_password_blocking(form.password, iterations).await?;
    let user = User::new(db.next_id(), &form.name, &form.email, password_hash);
    db.insert_user(user.clone())?;

    tracing::info!(user_id = user.id, "Account created");
    Ok(user)
}

/// Apply a profile edit and return the updated user.
pub fn update_profile(db: &MemoryDb, user_id: u64, mut update: ProfileUpdate) -> Result<User> {
    for field in [
        &mut update.name,
        &mut update.username,
        &mut update.bio,
        &mut update.location,
        &mut update.website,
    ] {
        trim_in_place(field);
    }
    update.validate()?;

    db.update_user(user_id, |user| {
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(bio) = update.bio {
            user.bio = bio;
        }
        if let Some(location) = update.location {
            user.location = location;
        }
        if let Some(website) = update.website {
            user.website = website;
        }
        if let Some(avatar_url) = update.avatar_url {
            user.avatar_url = avatar_url;
        }
        if let Some(tags) = update.skills_to_teach {
            user.skills_to_teach = normalize_tags(tags);
        }
        if let Some(tags) = update.skills_to_learn {
            user.skills_to_learn = normalize_tags(tags);
        }
        if let Some(flag) = update.is_location_public {
            user.is_location_public = flag;
        }
        if let Some(flag) = update.is_website_public {
            user.is_website_public = flag;
        }
        if let Some(notifications) = update.notifications {
            notifications.apply(&mut user.notifications);
        }
        Ok(user.clone())
    })
}

/// Change a password after verifying the current one.
///
/// Hashing runs off the store lock; the new hash is only written if the
/// stored one is still the hash that was verified.
pub async fn change_password(
    db: &MemoryDb,
    iterations: u32,
    user_id: u64,
    form: PasswordChange,
) -> Result<()> {
    if form.new_password.is_empty() || form.confirm_password.is_empty() {
        return Err(AppError::BadRequest(
            "Please fill out all new password fields.".to_string(),
        ));
    }
    if form.new_password != form.confirm_password {
        return Err(AppError::BadRequest("New passwords do not match.".to_string()));
    }
    if form.new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let verified_hash = db
        .get_user(user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?
        .password_hash;
    if !verify_password_blocking(form.current_password, verified_hash.clone()).await? {
        return Err(AppError::BadRequest(
            "Current password is incorrect.".to_string(),
        ));
    }
    let new_hash = hash_password_blocking(form.new_password, iterations).await?;

    swap_password_hash(db, user_id, &verified_hash, new_hash)?;
    tracing::info!(user_id, "Password changed");
    Ok(())
}

/// Replace the password hash if it still equals `expected`.
fn swap_password_hash(db: &MemoryDb, user_id: u64, expected: &str, new_hash: String) -> Result<()> {
    db.update_user(user_id, |user| {
        if user.password_hash != expected {
            return Err(AppError::Conflict(
                "Password was changed by another request. Please try again.".to_string(),
            ));
        }
        user.password_hash = new_hash;
        Ok(())
    })
}

/// One of the two tag lists on a profile (`teach` or `learn` in paths).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagList {
    Teach,
    Learn,
}

impl TagList {
    fn of(self, user: &mut User) -> &mut Vec<String> {
        match self {
            TagList::Teach => &mut user.skills_to_teach,
            TagList::Learn => &mut user.skills_to_learn,
        }
    }
}

/// Add one tag and return the list. Blank or duplicate tags leave it as is.
pub fn add_profile_tag(db: &MemoryDb, user_id: u64, list: TagList, tag: &str) -> Result<Vec<String>> {
    db.update_user(user_id, |user| {
        let tags = list.of(user);
        add_tag(tags, tag);
        Ok(tags.clone())
    })
}

/// Remove the tag at `index` and return the list.
pub fn remove_profile_tag(
    db: &MemoryDb,
    user_id: u64,
    list: TagList,
    index: usize,
) -> Result<Vec<String>> {
    db.update_user(user_id, |user| {
        let tags = list.of(user);
        remove_tag(tags, index)
            .ok_or_else(|| AppError::NotFound(format!("No tag at position {}", index)))?;
        Ok(tags.clone())
    })
}

/// Deactivate an account: withdraw the user's skills, decline the requests
/// still waiting on them and withdraw the requests they sent.
pub fn deactivate(db: &MemoryDb, user_id: u64) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    db.update_user(user_id, |user| {
        if user.deactivated_at.is_none() {
            user.deactivated_at = Some(now);
        }
        Ok(())
    })?;

    let skills = db.skills_by_owner(user_id);
    for skill in &skills {
        db.delete_skill(skill.id);
    }

    let waiting = db.list_requests(|r| {
        r.status == RequestStatus::Pending && (r.owner_id == user_id || r.requester_id == user_id)
    });
    let (mut declined, mut withdrawn) = (0, 0);
    for request in waiting {
        let Some(request) = decline_if_pending(db, request.id)? else {
            continue;
        };
        if request.owner_id == user_id {
            db.append_activity(
                request.requester_id,
                format!("Your request for \"{}\" was declined.", request.skill_name),
            );
            declined += 1;
        } else {
            db.append_activity(
                request.owner_id,
                format!(
                    "{} withdrew their request for \"{}\".",
                    request.requester_name, request.skill_name
                ),
            );
            withdrawn += 1;
        }
    }

    tracing::info!(
        user_id,
        skills_removed = skills.len(),
        requests_declined = declined,
        requests_withdrawn = withdrawn,
        "Account deactivated"
    );
    Ok(())
}
