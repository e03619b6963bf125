//! Login, registration and token verification

use tracing::{info, warn};
use validator::Validate;

use super::TokenKeys;
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, NewUser, RegisterRequest, User};
use crate::services::CredentialStore;

const DEFAULT_YEAR: i64 = 1;

#[derive(Clone)]
pub struct AuthService {
    credentials: CredentialStore,
    keys: TokenKeys,
}

impl AuthService {
    pub fn new(credentials: CredentialStore, keys: TokenKeys) -> Self {
        Self { credentials, keys }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, student_id: &str, password: &str) -> AppResult<AuthResponse> {
        let user = match self.credentials.verify(student_id, password).await {
            Ok(user) => user,
            Err(AppError::InvalidCredentials) => {
                warn!(student_id, "login rejected");
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        let token = self.keys.issue(user.id)?;
        info!(student_id, user_id = user.id, "login succeeded");

        Ok(AuthResponse { token, user })
    }

    /// Create an account and issue a session token
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        request.validate()?;

        let new_user = NewUser {
            student_id: request.student_id.unwrap_or_default().trim().to_string(),
            name: request.name.unwrap_or_default().trim().to_string(),
            email: request.email.unwrap_or_default().trim().to_string(),
            password: request.password.unwrap_or_default(),
            program: request
                .program
                .map(|p| p.trim().to_string())
                .unwrap_or_default(),
            year: request.year.unwrap_or(DEFAULT_YEAR),
        };

        let user = self.credentials.create(new_user).await?;
        let token = self.keys.issue(user.id)?;
        info!(student_id = %user.student_id, user_id = user.id, "student registered");

        Ok(AuthResponse { token, user })
    }

    /// Validate a token and resolve the user it names
    pub async fn verify(&self, token: &str) -> AppResult<User> {
        let claims = self.keys.decode(token)?;

        self.credentials
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
