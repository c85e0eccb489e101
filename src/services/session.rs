// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login sessions: credential checks and the session cookie.
//!
//! A session is a signed JWT carried in the `skillswap_token` cookie or an
//! `Authorization: Bearer` header. Restoring a session is just presenting
//! the token again; there is no server-side session table.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::Config;
use crate::db::MemoryDb;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::user::normalize_email;
use crate::models::User;
use crate::services::password::verify_password_blocking;

/// A freshly issued session.
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Check credentials and issue a session token.
///
/// Unknown email, wrong password and deactivated accounts all produce the
/// same `InvalidCredentials` error.
pub async fn login(
    db: &MemoryDb,
    config: &Config,
    email: &str,
    password: &str,
) -> Result<LoginOutcome> {
    let email = normalize_email(email);
    let rejected = || {
        tracing::info!("Login rejected");
        AppError::InvalidCredentials
    };

    let user = db
        .find_user_by_email(&email)
        .filter(|u| u.is_active())
        .ok_or_else(rejected)?;
    if !verify_password_blocking(password.to_string(), user.password_hash.clone()).await? {
        return Err(rejected());
    }

    let token = create_jwt(user.id, &config.jwt_signing_key, config.session_ttl_days)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = user.id, "Login successful");

    Ok(LoginOutcome { token, user })
}

/// Cookie carrying a session token.
pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies())
        .max_age(time::Duration::days(i64::from(config.session_ttl_days)))
        .build()
}

/// Cookie that clears the session; attributes match [`session_cookie`].
pub fn removal_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies())
        .max_age(time::Duration::ZERO)
        .build()
}
