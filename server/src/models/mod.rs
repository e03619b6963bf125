//! Data models for the university portal

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod auth;
pub use auth::*;

/// Row in the `users` table, including the password hash.
///
/// Never serialized; convert to [`User`] before anything leaves the store.
#[derive(Debug, sqlx::FromRow, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub program: Option<String>,
    pub year: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Public user model (no password hash)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub program: Option<String>,
    pub year: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            student_id: record.student_id,
            name: record.name,
            email: record.email,
            program: record.program,
            year: record.year,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Input for creating a user; the password is still plaintext here
#[derive(Debug, Clone)]
pub struct NewUser {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub program: String,
    pub year: i64,
}

/// Course model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Course {
    pub id: i64,
    pub course_code: String,
    pub course_name: String,
    pub description: Option<String>,
    pub credits: i64,
    pub instructor: Option<String>,
    pub semester: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Enrollment joined with the enrolled course's fields
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct EnrollmentWithCourse {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub grade: Option<String>,
    pub enrolled_at: NaiveDateTime,
    pub course_code: String,
    pub course_name: String,
    pub description: Option<String>,
    pub credits: i64,
    pub instructor: Option<String>,
    pub semester: Option<String>,
}

/// Request body for enrolling the current student
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub course_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollResponse {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
