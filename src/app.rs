/*
 * Responsibility
 * - Process bootstrap: tracing, panic hook, config, verifier, listener
 * - build_router: route layout + HTTP-level middleware (also used by tests)
 */
use std::{panic, process};

use anyhow::Context;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::build_auth_service;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,propelauth_axum=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash loudly; production: default hook, keep serving
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env().context("loading configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        auth_url = %config.auth_url,
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let auth = build_auth_service(&config)
        .await
        .context("initializing access token verifier")?;
    let state = AppState::new(auth);

    let app = build_router(state, &config);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app).await.context("serving HTTP")?;

    Ok(())
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    async fn health() -> Json<Value> {
        Json(json!({ "status": "ok" }))
    }

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, config)
}
