//! API handlers for the portal backend

pub mod auth;
pub mod course;
pub mod health;
pub mod student;

pub use auth::{login, register, verify};
pub use course::{get_course, list_courses};
pub use health::{health_check, not_found};
pub use student::{enroll, list_enrollments, profile};
