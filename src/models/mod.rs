// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod request;
pub mod skill;
pub mod user;

pub use activity::{ActivityEntry, ActivityView};
pub use request::{RequestStatus, SkillRequest};
pub use skill::{Skill, SkillCategory, SkillLevel};
pub use user::{NotificationSettings, User, UserProfile};
