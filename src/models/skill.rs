// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Skill listing model and its fixed category set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Filter label meaning "every category".
pub const ALL_CATEGORIES: &str = "All";

/// Category a skill is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SkillCategory {
    Technology,
    #[serde(rename = "Creative Arts")]
    CreativeArts,
    Lifestyle,
    Business,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Technology,
        SkillCategory::CreativeArts,
        SkillCategory::Lifestyle,
        SkillCategory::Business,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Technology => "Technology",
            SkillCategory::CreativeArts => "Creative Arts",
            SkillCategory::Lifestyle => "Lifestyle",
            SkillCategory::Business => "Business",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("Unknown category '{s}'"))
    }
}

/// Self-assessed teaching level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// A skill offered by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Skill {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    pub category: SkillCategory,
    /// Owner user ID
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub offered_by: u64,
    /// Owner display name (denormalized for listing)
    pub offered_by_name: String,
    /// What the owner wants to learn in return
    pub wants_in_exchange: String,
    pub description: Option<String>,
    pub level: Option<SkillLevel>,
    /// Free-text duration ("4 weeks")
    pub duration: Option<String>,
    /// Average rating, 0.0 to 5.0
    pub rating: Option<f32>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip_through_serde() {
        for category in SkillCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
            assert_eq!(category.label().parse::<SkillCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!("Cooking".parse::<SkillCategory>().is_err());
        assert!(ALL_CATEGORIES.parse::<SkillCategory>().is_err());
        assert!(serde_json::from_str::<SkillCategory>("\"technology\"").is_err());
    }
}
