//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;
use chrono::Duration;

use crate::auth::{AuthService, TokenKeys};
use crate::config::AppConfig;
use crate::db::Database;
use crate::services::{CourseStore, CredentialStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub course_store: Arc<CourseStore>,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>, course_store: Arc<CourseStore>) -> Self {
        Self {
            auth_service,
            course_store,
        }
    }

    /// Wire every service onto one database handle
    pub fn from_parts(db: &Database, jwt_secret: &str, token_ttl: Duration, bcrypt_cost: u32) -> Self {
        let credentials = CredentialStore::new(db.pool().clone(), bcrypt_cost);
        let keys = TokenKeys::new(jwt_secret, token_ttl);

        Self::new(
            Arc::new(AuthService::new(credentials, keys)),
            Arc::new(CourseStore::new(db.pool().clone())),
        )
    }

    pub fn from_config(db: &Database, config: &AppConfig) -> Self {
        Self::from_parts(
            db,
            &config.jwt_secret,
            Duration::hours(config.token_ttl_hours),
            config.bcrypt_cost,
        )
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<CourseStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.course_store.clone()
    }
}
