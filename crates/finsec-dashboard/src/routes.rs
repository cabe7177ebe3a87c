//! Route definitions

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{auth, dashboard, health, nav, reports, settings, upload},
    middleware::{logging_middleware, require_auth, session_middleware},
    state::AppState,
};

/// Routes reachable without logging in
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout).post(auth::logout))
}

/// Sidebar views and downloads, behind the login gate
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/nav", get(nav::navigate))
        .route("/dashboard", get(dashboard::dashboard))
        // Upload & Analyze
        .route("/upload", get(upload::upload_form).post(upload::upload))
        .route("/analyze", post(upload::analyze))
        .route("/results.csv", get(upload::download_results))
        // Reports
        .route("/reports", get(reports::reports))
        .route("/reports/full_report.csv", get(reports::download_report))
        // Settings
        .route(
            "/settings",
            get(settings::settings_form).post(settings::save_settings),
        )
        .route_layer(from_fn(require_auth))
}

/// Full application router with session binding and request logging
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    public_routes()
        .merge(protected_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn_with_state(state.clone(), session_middleware))
        // Health checks never bind a session
        .route("/health", get(health::health_check))
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
