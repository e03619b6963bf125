use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};

use crate::auth::AuthService;
use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, VerifyResponse};

/// POST /api/auth/login
pub async fn login(
    State(auth): State<Arc<AuthService>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(request) = payload?;

    let (Some(student_id), Some(password)) = (request.student_id, request.password) else {
        return Err(missing_login_fields());
    };
    if student_id.trim().is_empty() || password.is_empty() {
        return Err(missing_login_fields());
    }

    let response = auth.login(student_id.trim(), &password).await?;
    Ok(Json(response))
}

/// POST /api/auth/register
pub async fn register(
    State(auth): State<Arc<AuthService>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let Json(request) = payload?;

    let response = auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/auth/verify
///
/// The auth middleware has already validated the token and loaded the user.
pub async fn verify(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<VerifyResponse> {
    Json(VerifyResponse { valid: true, user })
}

fn missing_login_fields() -> AppError {
    AppError::Validation("Student ID and password are required".to_string())
}
