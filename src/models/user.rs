//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Number of profile facets counted towards completion.
const PROFILE_FACETS: u32 = 8;

/// User account held in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned user ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Handle shown on the profile page
    pub username: String,
    /// Login email, stored lowercase
    pub email: String,
    /// PBKDF2 hash in `pbkdf2-sha256$iterations$salt$hash` form
    pub password_hash: String,
    /// Avatar image URL
    pub avatar_url: String,
    pub bio: String,
    pub location: String,
    pub website: String,
    /// Skills the user can teach (tags)
    pub skills_to_teach: Vec<String>,
    /// Skills the user wants to learn (tags)
    pub skills_to_learn: Vec<String>,
    pub is_location_public: bool,
    pub is_website_public: bool,
    #[serde(default)]
    pub notifications: NotificationSettings,
    /// When the account was created (ISO 8601)
    pub created_at: String,
    /// Set when the user deactivated the account (ISO 8601)
    pub deactivated_at: Option<String>,
}

impl User {
    /// Build a freshly registered user with derived defaults.
    pub fn new(id: u64, name: &str, email: &str, password_hash: String) -> Self {
        let email = normalize_email(email);
        Self {
            id,
            name: name.trim().to_string(),
            username: default_username(name),
            avatar_url: default_avatar_url(&email),
            email,
            password_hash,
            bio: String::new(),
            location: String::new(),
            website: String::new(),
            skills_to_teach: Vec::new(),
            skills_to_learn: Vec::new(),
            is_location_public: true,
            is_website_public: false,
            notifications: NotificationSettings::default(),
            created_at: chrono::Utc::now().to_rfc3339(),
            deactivated_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.deactivated_at.is_none()
    }

    /// Percentage of profile facets that are filled in, rounded down.
    pub fn profile_completion(&self) -> u8 {
        let filled = [
            !self.name.trim().is_empty(),
            !self.username.trim().is_empty(),
            !self.bio.trim().is_empty(),
            !self.location.trim().is_empty(),
            !self.website.trim().is_empty(),
            !self.avatar_url.trim().is_empty(),
            !self.skills_to_teach.is_empty(),
            !self.skills_to_learn.is_empty(),
        ]
        .iter()
        .filter(|f| **f)
        .count() as u32;

        (filled * 100 / PROFILE_FACETS) as u8
    }

    /// Profile as seen by the account owner.
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
            email: Some(self.email.clone()),
            avatar_url: self.avatar_url.clone(),
            bio: self.bio.clone(),
            location: Some(self.location.clone()),
            website: Some(self.website.clone()),
            skills_to_teach: self.skills_to_teach.clone(),
            skills_to_learn: self.skills_to_learn.clone(),
            is_location_public: self.is_location_public,
            is_website_public: self.is_website_public,
            notifications: Some(self.notifications),
            profile_completion: self.profile_completion(),
            created_at: self.created_at.clone(),
        }
    }

    /// Profile as seen by other users: email and notification settings are
    /// never shown, location and website only when their public flag is set.
    pub fn to_public_profile(&self) -> UserProfile {
        let mut profile = self.to_profile();
        profile.email = None;
        profile.notifications = None;
        if !self.is_location_public {
            profile.location = None;
        }
        if !self.is_website_public {
            profile.website = None;
        }
        profile
    }
}

/// User profile for API responses (never carries the password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub avatar_url: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub skills_to_teach: Vec<String>,
    pub skills_to_learn: Vec<String>,
    pub is_location_public: bool,
    pub is_website_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationSettings>,
    pub profile_completion: u8,
    pub created_at: String,
}

/// Which emails the user wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NotificationSettings {
    /// Someone asked to learn one of the user's skills
    pub skill_requests: bool,
    /// Direct messages and chat activity
    pub messages: bool,
    /// Newsletter and promotions (opt-in)
    pub newsletter: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            skill_requests: true,
            messages: true,
            newsletter: false,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Lowercased name with whitespace removed ("Alex Ray" -> "alexray").
pub fn default_username(name: &str) -> String {
    name.split_whitespace()
        .collect::<String>()
        .to_lowercase()
}

pub fn default_avatar_url(email: &str) -> String {
    format!(
        "https://i.pravatar.cc/150?u={}",
        urlencoding::encode(&normalize_email(email))
    )
}

/// Add a tag to a list: trimmed, and ignored when empty or already present.
///
/// Returns whether the list changed.
pub fn add_tag(tags: &mut Vec<String>, tag: &str) -> bool {
    let tag = tag.trim();
    if tag.is_empty() || tags.iter().any(|t| t == tag) {
        return false;
    }
    tags.push(tag.to_string());
    true
}

/// Remove the tag at `index`, if there is one.
pub fn remove_tag(tags: &mut Vec<String>, index: usize) -> Option<String> {
    (index < tags.len()).then(|| tags.remove(index))
}

/// Build a tag list by feeding every entry through [`add_tag`].
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    for tag in tags {
        add_tag(&mut out, tag.as_ref());
    }
    out
}
