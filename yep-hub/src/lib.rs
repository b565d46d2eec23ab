//! yep-hub library - Interview Hub module
//!
//! Aggregates interview obligations from the hiring and instructor
//! readiness workflows into one role-filtered, sorted task list.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod interviews;

use interviews::HiringPolicy;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Applicant waiting-stage policy, loaded from settings at startup
    pub policy: HiringPolicy,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, policy: HiringPolicy) -> Self {
        Self { db, policy }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route(
            "/api/interviews/command-center",
            get(api::get_command_center),
        )
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
