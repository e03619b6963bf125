//! University portal backend library
//!
//! Student authentication, course listing and enrollment lookup over SQLite,
//! plus an API client for the same endpoints.

pub mod app_state;
pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use app_state::AppState;
pub use error::{AppError, AppResult};
pub use routes::build_router;
