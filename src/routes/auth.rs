// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration and login/logout routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::models::UserProfile;
use crate::services::accounts::{self, RegisterRequest};
use crate::services::session::{self, removal_cookie, session_cookie};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Create an account. The client signs in separately afterwards.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let user = accounts::register(&state.db, state.config.password_iterations, form).await?;
    Ok((StatusCode::CREATED, Json(user.to_profile())))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    /// Bearer token, also set as the session cookie
    pub token: String,
    pub user: UserProfile,
}

/// Sign in with email and password.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(credentials): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let outcome = session::login(
        &state.db,
        &state.config,
        &credentials.email,
        &credentials.password,
    )
    .await?;

    let jar = jar.add(session_cookie(outcome.token.clone(), &state.config));
    Ok((
        jar,
        Json(LoginResponse {
            token: outcome.token,
            user: outcome.user.to_profile(),
        }),
    ))
}

/// Sign out by clearing the session cookie. Bearer-token clients simply
/// drop their token.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    (jar.add(removal_cookie(&state.config)), StatusCode::NO_CONTENT)
}
