//! Authentication module for the university portal
//!
//! - bcrypt password hashing on the blocking pool
//! - HS256 session tokens with a fixed validity window
//! - Login, registration and token verification on top of the credential store

mod jwt;
mod password;
mod service;

pub use jwt::{Claims, TokenKeys};
pub use password::{hash_password, verify_password, MAX_PASSWORD_BYTES};
pub use service::AuthService;
