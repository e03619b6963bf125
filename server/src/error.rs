//! Error taxonomy for the portal API
//!
//! Every service returns [`AppError`]; handlers propagate it with `?` and the
//! [`IntoResponse`] impl maps it to a status code and a `{"message": ...}`
//! body. Internal failures are logged here and never echoed to the client.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

/// Result alias used across services and handlers
pub type AppResult<T> = Result<T, AppError>;

/// Application error
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed client input
    #[error("{0}")]
    Validation(String),

    /// Unknown student id or wrong password. The two are indistinguishable.
    #[error("Invalid student ID or password")]
    InvalidCredentials,

    /// No bearer token on a protected route
    #[error("Access token required")]
    MissingToken,

    /// Bad signature, malformed, or expired token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("token signing error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON body for every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Hashing(_)
            | AppError::Token(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client
    pub fn public_message(&self) -> String {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }

    /// True when a database error is a UNIQUE constraint violation
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// One readable sentence per failed field, ordered by field name
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| match &failure.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();

        AppError::Validation(messages.join("; "))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_hide_detail() {
        let err = AppError::Internal("pool exhausted at 0x1234".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn credential_and_token_errors_map_to_auth_statuses() {
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::InvalidCredentials.public_message(),
            "Invalid student ID or password"
        );
    }

    #[test]
    fn validation_failures_read_as_sentences() {
        use crate::models::RegisterRequest;
        use validator::Validate;

        let request = RegisterRequest {
            email: Some("ann-at-u.edu".to_string()),
            year: Some(0),
            ..Default::default()
        };
        let err = AppError::from(request.validate().unwrap_err());

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.public_message(),
            "email must be a valid address; year must be between 1 and 10"
        );
    }

    #[test]
    fn client_errors_keep_their_message() {
        let err = AppError::Conflict("Student ID already registered".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.public_message(), "Student ID already registered");

        let err = AppError::NotFound("User not found".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
