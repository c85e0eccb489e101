// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Skill search: category filter plus substring match.
//!
//! A linear predicate pass over the listing; input order is preserved and
//! there is no ranking.

use crate::models::skill::ALL_CATEGORIES;
use crate::models::{Skill, SkillCategory};

/// Criteria for narrowing the skill listing.
#[derive(Debug, Clone, Default)]
pub struct SkillFilter {
    /// `None` matches every category
    pub category: Option<SkillCategory>,
    /// Lowercased, trimmed search text; `None` when empty
    query: Option<String>,
}

/// Filtered skills together with the counts shown above the listing.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub skills: Vec<Skill>,
    /// Number of skills that matched
    pub showing: usize,
    /// Number of skills before filtering
    pub total: usize,
}

impl SkillFilter {
    pub fn new(category: Option<SkillCategory>, query: Option<&str>) -> Self {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);
        Self { category, query }
    }

    /// Build a filter from raw query parameters. The category label `All`
    /// (or no label) means no category filter.
    pub fn parse(category: Option<&str>, query: Option<&str>) -> Result<Self, String> {
        let category = match category.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => None,
            Some(label) => Some(label.parse::<SkillCategory>()?),
        };
        Ok(Self::new(category, query))
    }

    /// Whether a skill passes both criteria. The text query matches the
    /// skill name or the offering user's name, ignoring case.
    pub fn matches(&self, skill: &Skill) -> bool {
        if let Some(category) = self.category {
            if skill.category != category {
                return false;
            }
        }
        match &self.query {
            Some(q) => {
                skill.name.to_lowercase().contains(q.as_str())
                    || skill.offered_by_name.to_lowercase().contains(q.as_str())
            }
            None => true,
        }
    }

    pub fn apply(&self, skills: Vec<Skill>) -> SearchResult {
        let total = skills.len();
        let skills: Vec<Skill> = skills.into_iter().filter(|s| self.matches(s)).collect();
        SearchResult {
            showing: skills.len(),
            skills,
            total,
        }
    }
}

/// Turn a URL slug back into a skill name ("react-development" ->
/// "react development").
pub fn deslug(slug: &str) -> String {
    slug.replace('-', " ").trim().to_string()
}

/// Skills whose name equals the de-slugged text, ignoring case.
pub fn offers_for_slug<'a>(skills: &'a [Skill], slug: &str) -> Vec<&'a Skill> {
    let wanted = deslug(slug).to_lowercase();
    skills
        .iter()
        .filter(|s| s.name.to_lowercase() == wanted)
        .collect()
}
