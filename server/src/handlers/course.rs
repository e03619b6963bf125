use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::models::Course;
use crate::services::CourseStore;

/// GET /api/courses
pub async fn list_courses(State(courses): State<Arc<CourseStore>>) -> AppResult<Json<Vec<Course>>> {
    Ok(Json(courses.list_courses().await?))
}

/// GET /api/courses/:id
pub async fn get_course(
    State(courses): State<Arc<CourseStore>>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Course>> {
    let Path(id) = path?;

    courses
        .get_course_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
}
