//! Route definitions for the portal API

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::handlers::{health_check, not_found};
use crate::middleware::{cors_layer, require_auth, with_security_headers};

mod auth;
mod course;
mod student;

pub use auth::auth_routes;
pub use course::course_routes;
pub use student::student_routes;

/// Full API router with state, fallback and cross-cutting layers applied
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let protected = Router::new()
        .merge(auth::verify_routes())
        .merge(student_routes())
        .merge(course_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let router = Router::new()
        .route("/api/health", axum::routing::get(health_check))
        .merge(auth_routes())
        .merge(protected)
        .fallback(not_found)
        .with_state(state);

    with_security_headers(router)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}
