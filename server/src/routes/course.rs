use axum::{routing::get, Router};

use crate::app_state::AppState;
use crate::handlers::{get_course, list_courses};

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/api/courses", get(list_courses))
        .route("/api/courses/:id", get(get_course))
}
