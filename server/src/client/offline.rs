//! Offline demo directory
//!
//! A local, non-authoritative user list for demoing the portal without a
//! server. Passwords are stored as [`weak_hash`], a 32-bit string hash that
//! is NOT a cryptographic function: anyone holding the stored value can find
//! a matching password instantly. Nothing here is consulted by the server.

use chrono::Utc;
use thiserror::Error;

use crate::models::User;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OfflineError {
    #[error("Invalid Student ID or password")]
    InvalidCredentials,

    #[error("Student ID already exists")]
    DuplicateStudentId,

    #[error("Email already registered")]
    DuplicateEmail,
}

#[derive(Debug, Clone)]
struct OfflineUser {
    user: User,
    password_hash: String,
}

/// Token and user handed back by a demo login
#[derive(Debug, Clone)]
pub struct OfflineSession {
    pub token: String,
    pub user: User,
}

/// Demo account registration input
#[derive(Debug, Clone)]
pub struct OfflineRegistration<'a> {
    pub student_id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub program: &'a str,
    pub year: i64,
}

#[derive(Debug, Default)]
pub struct OfflineDirectory {
    users: Vec<OfflineUser>,
}

/// Signed 32-bit `h * 31 + unit` hash over the UTF-16 code units, rendered
/// in decimal. Demo only.
pub fn weak_hash(password: &str) -> String {
    password
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        })
        .to_string()
}

impl OfflineDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory preloaded with the John Doe demo account (`12345` / `password123`)
    pub fn with_demo_user() -> Self {
        let now = Utc::now().naive_utc();
        let mut directory = Self::new();
        directory.users.push(OfflineUser {
            user: User {
                id: 1,
                student_id: "12345".to_string(),
                name: "John Doe".to_string(),
                email: "john.doe@university.edu".to_string(),
                program: Some("Computer Science".to_string()),
                year: Some(3),
                created_at: now,
                updated_at: now,
            },
            password_hash: weak_hash("password123"),
        });
        directory
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn login(&self, student_id: &str, password: &str) -> Result<OfflineSession, OfflineError> {
        let entry = self
            .users
            .iter()
            .find(|u| u.user.student_id == student_id)
            .ok_or(OfflineError::InvalidCredentials)?;

        if entry.password_hash != weak_hash(password) {
            return Err(OfflineError::InvalidCredentials);
        }

        Ok(OfflineSession {
            token: demo_token(),
            user: entry.user.clone(),
        })
    }

    /// Add an account and log it in
    pub fn register(
        &mut self,
        registration: OfflineRegistration<'_>,
    ) -> Result<OfflineSession, OfflineError> {
        if self
            .users
            .iter()
            .any(|u| u.user.student_id == registration.student_id)
        {
            return Err(OfflineError::DuplicateStudentId);
        }
        if self.users.iter().any(|u| u.user.email == registration.email) {
            return Err(OfflineError::DuplicateEmail);
        }

        let now = Utc::now().naive_utc();
        let id = self.users.iter().map(|u| u.user.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            student_id: registration.student_id.to_string(),
            name: registration.name.to_string(),
            email: registration.email.to_string(),
            program: Some(registration.program.to_string()),
            year: Some(registration.year),
            created_at: now,
            updated_at: now,
        };

        self.users.push(OfflineUser {
            user: user.clone(),
            password_hash: weak_hash(registration.password),
        });

        Ok(OfflineSession {
            token: demo_token(),
            user,
        })
    }
}

fn demo_token() -> String {
    format!("demo-token-{}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_hash_matches_the_javascript_string_hash() {
        assert_eq!(weak_hash(""), "0");
        assert_eq!(weak_hash("abc"), "96354");
        assert_eq!(weak_hash("password123"), "1403730359");
    }

    #[test]
    fn demo_user_can_log_in() {
        let directory = OfflineDirectory::with_demo_user();
        let session = directory.login("12345", "password123").unwrap();
        assert_eq!(session.user.name, "John Doe");
        let millis: i64 = session
            .token
            .strip_prefix("demo-token-")
            .unwrap()
            .parse()
            .unwrap();
        assert!(millis > 0);

        assert_eq!(
            directory.login("12345", "password124").unwrap_err(),
            OfflineError::InvalidCredentials
        );
        assert_eq!(
            directory.login("00000", "password123").unwrap_err(),
            OfflineError::InvalidCredentials
        );
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut directory = OfflineDirectory::with_demo_user();
        let ann = OfflineRegistration {
            student_id: "99999",
            name: "Ann",
            email: "ann@u.edu",
            password: "pw12345",
            program: "",
            year: 1,
        };

        let session = directory.register(ann.clone()).unwrap();
        assert_eq!(session.user.id, 2);
        assert_eq!(directory.len(), 2);
        assert!(directory.login("99999", "pw12345").is_ok());

        assert_eq!(
            directory.register(ann.clone()).unwrap_err(),
            OfflineError::DuplicateStudentId
        );
        assert_eq!(
            directory
                .register(OfflineRegistration {
                    student_id: "88888",
                    ..ann
                })
                .unwrap_err(),
            OfflineError::DuplicateEmail
        );
    }
}
