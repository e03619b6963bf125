use axum::Json;

use crate::error::AppError;
use crate::models::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}

/// Fallback for unmatched routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}
