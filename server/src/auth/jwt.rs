//! Session token issuance and validation

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Token claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Internal user id (`users.id`)
    pub user_id: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Signing secret and validity window, built once at startup
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user_id` valid from now
    pub fn issue(&self, user_id: i64) -> AppResult<String> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if it were created at `issued_at`
    pub fn issue_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> AppResult<String> {
        let claims = Claims {
            user_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Check signature and expiry.
    ///
    /// A token is valid only while `now < exp`; jsonwebtoken alone still
    /// accepts it during the second where `now == exp`. Malformed, wrongly
    /// signed and expired tokens all collapse into [`AppError::InvalidToken`].
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AppError::InvalidToken
            })?;

        if claims.exp <= Utc::now().timestamp() {
            tracing::debug!(exp = claims.exp, "token rejected at expiry");
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}
