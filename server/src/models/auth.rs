//! Authentication request and response DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::User;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct LoginRequest {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 10, message = "year must be between 1 and 10"))]
    pub year: Option<i64>,
}

impl RegisterRequest {
    /// Names of required fields that are absent or blank, in request order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("student_id", &self.student_id),
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(field, _)| field)
        .collect()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Returned by login and register
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_reported_missing() {
        let request = RegisterRequest {
            student_id: Some("42".to_string()),
            name: Some("   ".to_string()),
            email: None,
            password: Some("secret".to_string()),
            ..Default::default()
        };
        assert_eq!(request.missing_fields(), vec!["name", "email"]);
    }

    #[test]
    fn email_format_is_validated() {
        let request = RegisterRequest {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = RegisterRequest {
            email: Some("ann@u.edu".to_string()),
            year: Some(2),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }
}
