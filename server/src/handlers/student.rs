use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{EnrollRequest, EnrollResponse, EnrollmentWithCourse, User};
use crate::services::CourseStore;

/// GET /api/student/profile
pub async fn profile(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<User> {
    Json(user)
}

/// GET /api/student/enrollments
pub async fn list_enrollments(
    State(courses): State<Arc<CourseStore>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<Vec<EnrollmentWithCourse>>> {
    let enrollments = courses.list_enrollments(&user.student_id).await?;
    Ok(Json(enrollments))
}

/// POST /api/student/enrollments
pub async fn enroll(
    State(courses): State<Arc<CourseStore>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<EnrollRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<EnrollResponse>)> {
    let Json(request) = payload?;

    let id = courses.enroll(&user.student_id, request.course_id).await?;
    Ok((StatusCode::CREATED, Json(EnrollResponse { id })))
}
