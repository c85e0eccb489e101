// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.
//!
//! Browsing, registration and login are public. Everything tied to a user
//! sits behind [`require_auth`].

pub mod api;
pub mod auth;
pub mod skills;

use crate::middleware::{require_auth, security::add_security_headers};
use crate::AppState;
use axum::extract::State;
use axum::http::{header, request::Parts, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Origin prefixes always accepted for local development.
const DEV_ORIGINS: [&str; 2] = ["http://localhost", "http://127.0.0.1"];

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub build_id: String,
    /// Skills currently listed
    pub skills: u32,
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build_id: option_env!("BUILD_ID").unwrap_or("unknown").to_string(),
        skills: state.db.skill_count() as u32,
    })
}

/// Whether a browser origin may call the API with credentials.
fn is_allowed_origin(origin: &str, frontend_url: &str) -> bool {
    origin == frontend_url.trim_end_matches('/')
        || DEV_ORIGINS.iter().any(|dev| {
            origin
                .strip_prefix(dev)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(':'))
        })
}

fn cors_layer(frontend_url: String) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .is_ok_and(|o| is_allowed_origin(o, &frontend_url))
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/health", get(health_check))
        .merge(auth::routes())
        .merge(skills::public_routes())
        .merge(api::public_routes());

    // Same paths as some public routes (e.g. GET vs PUT /api/skills/{id});
    // route_layer keeps the auth check on these methods only.
    let protected = api::routes()
        .merge(skills::protected_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(middleware::from_fn(add_security_headers))
        .layer(cors_layer(state.config.frontend_url.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins() {
        let frontend = "https://skillswap.example.com/";
        assert!(is_allowed_origin("https://skillswap.example.com", frontend));
        assert!(is_allowed_origin("http://localhost", frontend));
        assert!(is_allowed_origin("http://localhost:3000", frontend));
        assert!(is_allowed_origin("http://127.0.0.1:5173", frontend));

        assert!(!is_allowed_origin("http://localhost.evil.com", frontend));
        assert!(!is_allowed_origin("https://evil.example.com", frontend));
        assert!(!is_allowed_origin("http://skillswap.example.com", frontend));
    }
}
