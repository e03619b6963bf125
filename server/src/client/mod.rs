//! HTTP client for the portal API
//!
//! Performs the same calls the web front end makes and keeps the issued
//! token in a [`SessionStore`]. The [`offline`] directory is a separate,
//! non-authoritative demo mirror and shares no code with this client.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::ErrorBody;
use crate::models::{
    AuthResponse, Course, EnrollmentWithCourse, LoginRequest, RegisterRequest, User,
};

pub mod offline;
mod session;

pub use session::{MemorySessionStore, SessionStore, StoredSession};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("No authentication token")]
    NotAuthenticated,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct ApiClient<S: SessionStore = MemorySessionStore> {
    http: reqwest::Client,
    base_url: String,
    session: S,
}

impl ApiClient<MemorySessionStore> {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_store(base_url, MemorySessionStore::default())
    }
}

impl<S: SessionStore> ApiClient<S> {
    pub fn with_store(base_url: impl Into<String>, session: S) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub async fn login(&self, student_id: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginRequest {
            student_id: Some(student_id.to_string()),
            password: Some(password.to_string()),
        };
        let request = self.http.post(self.url("/auth/login")).json(&body);

        let response: AuthResponse = Self::send(request).await?;
        self.remember(&response);
        Ok(response)
    }

    /// Register and keep the returned session, same as a login
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let request = self.http.post(self.url("/auth/register")).json(request);

        let response: AuthResponse = Self::send(request).await?;
        self.remember(&response);
        Ok(response)
    }

    pub fn logout(&self) {
        self.session.clear();
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.load().map(|s| s.user)
    }

    pub fn auth_token(&self) -> Option<String> {
        self.session.load().map(|s| s.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token().is_some()
    }

    /// Ask the server whether the stored token is still good.
    ///
    /// No token, a rejected token and a transport failure all read as `false`.
    pub async fn verify_token(&self) -> bool {
        let Some(token) = self.auth_token() else {
            return false;
        };

        match self
            .http
            .get(self.url("/auth/verify"))
            .bearer_auth(token)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "token verification request failed");
                false
            }
        }
    }

    pub async fn profile(&self) -> Result<User, ClientError> {
        self.authorized_get("/student/profile").await
    }

    pub async fn courses(&self) -> Result<Vec<Course>, ClientError> {
        self.authorized_get("/courses").await
    }

    pub async fn enrollments(&self) -> Result<Vec<EnrollmentWithCourse>, ClientError> {
        self.authorized_get("/student/enrollments").await
    }

    async fn authorized_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let token = self.auth_token().ok_or(ClientError::NotAuthenticated)?;
        Self::send(self.http.get(self.url(path)).bearer_auth(token)).await
    }

    fn remember(&self, response: &AuthResponse) {
        self.session.save(StoredSession {
            token: response.token.clone(),
            user: response.user.clone(),
        });
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };
        Err(ClientError::Api { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = ApiClient::new("http://localhost:3000/api/");
        assert_eq!(client.url("/auth/login"), "http://localhost:3000/api/auth/login");
    }

    #[tokio::test]
    async fn unauthenticated_client_short_circuits() {
        let client = ApiClient::new("http://127.0.0.1:9/api");
        assert!(!client.is_authenticated());
        assert!(!client.verify_token().await);
        assert!(matches!(client.profile().await, Err(ClientError::NotAuthenticated)));
    }
}
