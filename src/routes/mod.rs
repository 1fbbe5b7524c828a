//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the project CRUD endpoints and the palette listing under a single
//! Axum router. The editor frontend is a separate deliverable; this service
//! only owns persistence and the template catalog.

pub mod projects;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/project", get(projects::list).post(projects::create))
        .route(
            "/api/project/{id}",
            get(projects::fetch).put(projects::save).delete(projects::remove),
        )
        .route("/api/palette", get(projects::palette))
        .route("/api/module/{path}", get(projects::module))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
