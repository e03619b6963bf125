//! Middleware for the portal API
//!
//! Bearer-token authentication for protected routes, plus the CORS, tracing
//! and security-header layers applied to the whole router.

mod auth;
mod security;

pub use auth::{require_auth, CurrentUser};
pub use security::{cors_layer, with_security_headers};
