// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SkillSwap API Server
//!
//! Serves the skill-exchange marketplace: accounts, skill listings and
//! exchange requests.

use skillswap_api::{config::Config, db::MemoryDb, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting SkillSwap API");

    let db = MemoryDb::new();
    if config.seed_demo_data {
        let summary = skillswap_api::db::seed::load_demo_data(&db, config.password_iterations)?;
        tracing::info!(
            users = summary.users,
            skills = summary.skills,
            requests = summary.requests,
            "Demo data loaded"
        );
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
    });

    // Build router
    let app = skillswap_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skillswap_api=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
