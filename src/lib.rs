//! CrewMatch volunteer coordination backend.
//!
//! A REST backend with SQLite persistence and Slack workspace lookups,
//! plus the client-side registration/session library under [`client`].

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod slack;

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use db::Repository;
use slack::SlackClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub slack: Arc<SlackClient>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Volunteers
        .route("/volunteer", get(api::list_volunteers))
        .route("/volunteer", post(api::add_volunteer))
        .route("/volunteer/assign", post(api::assign_volunteer))
        .route("/volunteer/slack/exists", post(api::slack_exists))
        .route("/volunteer/{id}", get(api::get_volunteer))
        .route("/volunteer/{id}", put(api::edit_volunteer))
        .route("/volunteer/{id}", patch(api::edit_volunteer))
        .route("/volunteer/{id}", delete(api::remove_volunteer))
        // Projects
        .route("/project", get(api::list_projects))
        .route("/project", post(api::add_project))
        .route("/project/{id}", get(api::get_project))
        .route("/project/{id}", put(api::edit_project))
        .route("/project/{id}", delete(api::remove_project));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
