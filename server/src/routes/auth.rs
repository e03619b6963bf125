use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::handlers::{login, register, verify};

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
}

/// Token check; mounted behind the auth middleware
pub(super) fn verify_routes() -> Router<AppState> {
    Router::new().route("/api/auth/verify", get(verify))
}
