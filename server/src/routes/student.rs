use axum::{routing::get, Router};

use crate::app_state::AppState;
use crate::handlers::{enroll, list_enrollments, profile};

pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/api/student/profile", get(profile))
        .route(
            "/api/student/enrollments",
            get(list_enrollments).post(enroll),
        )
}
