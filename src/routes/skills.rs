// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Skill listing routes.
//!
//! Browsing is public; offering, editing and removing skills require a
//! session (see `routes/mod.rs`).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::skill::ALL_CATEGORIES;
use crate::models::{Skill, SkillCategory};
use crate::services::exchange::{self, SkillOffer, SkillUpdate};
use crate::services::search::{deslug, offers_for_slug, SkillFilter};
use crate::AppState;

/// Longest accepted search text.
const MAX_QUERY_LEN: usize = 100;

/// Routes anyone can call.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/skills", get(list_skills))
        .route("/api/skills/{id}", get(get_skill))
        .route("/api/offers/{slug}", get(get_offers))
        .route("/api/categories", get(list_categories))
}

/// Routes for signed-in users.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/skills", post(create_skill))
        .route("/api/skills/{id}", put(update_skill).delete(delete_skill))
}

// ─── Browsing ────────────────────────────────────────────────

#[derive(Deserialize)]
struct SkillsQuery {
    /// Category label, or "All"
    category: Option<String>,
    /// Search text matched against skill and tutor names
    q: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SkillsResponse {
    pub skills: Vec<Skill>,
    /// Number of skills matching the filter
    pub showing: u32,
    /// Number of skills listed overall
    pub total: u32,
}

/// List skills, optionally narrowed by category and search text.
async fn list_skills(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SkillsQuery>,
) -> Result<Json<SkillsResponse>> {
    if params.q.as_ref().is_some_and(|q| q.chars().count() > MAX_QUERY_LEN) {
        return Err(AppError::BadRequest(format!(
            "Search text must be at most {MAX_QUERY_LEN} characters"
        )));
    }

    let filter = SkillFilter::parse(params.category.as_deref(), params.q.as_deref())
        .map_err(AppError::BadRequest)?;
    let result = filter.apply(state.db.list_skills());

    tracing::debug!(
        category = ?params.category,
        query = ?params.q,
        showing = result.showing,
        total = result.total,
        "Listing skills"
    );

    Ok(Json(SkillsResponse {
        showing: result.showing as u32,
        total: result.total as u32,
        skills: result.skills,
    }))
}

async fn get_skill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Skill>> {
    state
        .db
        .get_skill(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Skill {} not found", id)))
}

/// One tutor's offer of a skill.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OfferSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub skill_id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub offered_by: u64,
    pub offered_by_name: String,
    pub avatar_url: Option<String>,
    pub rating: Option<f32>,
    pub wants_in_exchange: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OffersResponse {
    pub skill_name: String,
    pub offers: Vec<OfferSummary>,
}

/// Every tutor offering the skill named by a URL slug
/// (`/api/offers/guitar-lessons`).
async fn get_offers(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<OffersResponse>> {
    let skills = state.db.list_skills();
    let matches = offers_for_slug(&skills, &slug);
    // Listed spelling when there is one, else the slug's words
    let skill_name = matches
        .first()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| deslug(&slug));

    let offers = matches
        .into_iter()
        .map(|skill| OfferSummary {
            skill_id: skill.id,
            offered_by: skill.offered_by,
            offered_by_name: skill.offered_by_name.clone(),
            avatar_url: state.db.get_user(skill.offered_by).map(|u| u.avatar_url),
            rating: skill.rating,
            wants_in_exchange: skill.wants_in_exchange.clone(),
        })
        .collect();

    Ok(Json(OffersResponse { skill_name, offers }))
}

/// Category labels for the filter bar, starting with "All".
async fn list_categories() -> Json<Vec<&'static str>> {
    let mut labels = vec![ALL_CATEGORIES];
    labels.extend(SkillCategory::ALL.iter().map(|c| c.label()));
    Json(labels)
}

// ─── Offering ────────────────────────────────────────────────

async fn create_skill(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(offer): Json<SkillOffer>,
) -> Result<(StatusCode, Json<Skill>)> {
    let skill = exchange::offer_skill(&state.db, &user, offer)?;
    Ok((StatusCode::CREATED, Json(skill)))
}

async fn update_skill(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<u64>,
    Json(update): Json<SkillUpdate>,
) -> Result<Json<Skill>> {
    exchange::update_skill(&state.db, user.user_id, id, update).map(Json)
}

async fn delete_skill(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<u64>,
) -> Result<StatusCode> {
    exchange::delete_skill(&state.db, user.user_id, id)?;
    Ok(StatusCode::NO_CONTENT)
}
