// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ActivityView, RequestStatus, SkillRequest, UserProfile};
use crate::services::accounts::{self, PasswordChange, ProfileUpdate, TagList};
use crate::services::dashboard::{self, DashboardResponse};
use crate::services::exchange::{self, Direction};
use crate::services::session::removal_cookie;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest activity feed a client can ask for.
const MAX_ACTIVITY_LIMIT: usize = 100;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).put(update_me))
        .route("/api/me/password", put(change_password))
        .route("/api/me/tags/{list}", post(add_tag))
        .route("/api/me/tags/{list}/{index}", delete(remove_tag))
        .route("/api/account", delete(delete_account))
        .route("/api/requests", get(get_requests).post(create_request))
        .route("/api/requests/{id}", put(answer_request))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/activity", get(get_activity))
}

/// Public profile lookup (no session needed).
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users/{id}", get(get_user_profile))
}

// ─── User Profile ────────────────────────────────────────────

/// Get the signed-in user's profile. This is also how a client restores a
/// session: a 401 here means the stored token is no longer good.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state
        .db
        .get_user(user.user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;
    Ok(Json(profile.to_profile()))
}

async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>> {
    let updated = accounts::update_profile(&state.db, user.user_id, update)?;
    tracing::info!(user_id = user.user_id, "Profile updated");
    Ok(Json(updated.to_profile()))
}

async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(form): Json<PasswordChange>,
) -> Result<StatusCode> {
    accounts::change_password(
        &state.db,
        state.config.password_iterations,
        user.user_id,
        form,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct NewTag {
    tag: String,
}

/// Add a tag to `skills_to_teach` (`teach`) or `skills_to_learn` (`learn`).
async fn add_tag(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(list): Path<TagList>,
    Json(body): Json<NewTag>,
) -> Result<Json<Vec<String>>> {
    accounts::add_profile_tag(&state.db, user.user_id, list, &body.tag).map(Json)
}

async fn remove_tag(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((list, index)): Path<(TagList, usize)>,
) -> Result<Json<Vec<String>>> {
    accounts::remove_profile_tag(&state.db, user.user_id, list, index).map(Json)
}

/// Another user's profile, with private fields hidden.
async fn get_user_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<UserProfile>> {
    state
        .db
        .get_user(id)
        .filter(|u| u.is_active())
        .map(|u| Json(u.to_public_profile()))
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
}

// ─── Account Deactivation ────────────────────────────────────

/// Deactivate the account and end the session.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    tracing::info!(user_id = user.user_id, "User-initiated account deactivation");
    accounts::deactivate(&state.db, user.user_id)?;
    Ok((jar.add(removal_cookie(&state.config)), StatusCode::NO_CONTENT))
}

// ─── Requests ────────────────────────────────────────────────

#[derive(Deserialize)]
struct RequestsQuery {
    status: Option<RequestStatus>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RequestsResponse {
    /// Requests the user sent
    pub outgoing: Vec<SkillRequest>,
    /// Requests for the user's skills
    pub incoming: Vec<SkillRequest>,
}

async fn get_requests(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<RequestsQuery>,
) -> Json<RequestsResponse> {
    Json(RequestsResponse {
        outgoing: exchange::list_requests(&state.db, user.user_id, Direction::Outgoing, params.status),
        incoming: exchange::list_requests(&state.db, user.user_id, Direction::Incoming, params.status),
    })
}

#[derive(Deserialize)]
struct NewRequest {
    skill_id: u64,
}

/// Ask to learn a skill.
async fn create_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<NewRequest>,
) -> Result<(StatusCode, Json<SkillRequest>)> {
    let request = exchange::send_request(&state.db, &user, body.skill_id)?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[derive(Deserialize)]
struct RequestAnswer {
    status: RequestStatus,
}

/// Accept or decline a request for one of the user's skills.
async fn answer_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<u64>,
    Json(body): Json<RequestAnswer>,
) -> Result<Json<SkillRequest>> {
    exchange::respond(&state.db, user.user_id, id, body.status).map(Json)
}

// ─── Dashboard & Activity ────────────────────────────────────

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardResponse>> {
    dashboard::summary(&state.db, user.user_id).map(Json)
}

#[derive(Deserialize)]
struct ActivityQuery {
    #[serde(default = "default_activity_limit")]
    limit: usize,
}

fn default_activity_limit() -> usize {
    dashboard::RECENT_ACTIVITY_LIMIT
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityView>>> {
    if params.limit == 0 || params.limit > MAX_ACTIVITY_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {MAX_ACTIVITY_LIMIT}"
        )));
    }

    let now = chrono::Utc::now();
    let feed = state
        .db
        .activity_for_user(user.user_id, params.limit)
        .iter()
        .map(|e| e.to_view(now))
        .collect();
    Ok(Json(feed))
}
