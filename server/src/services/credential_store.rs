//! Credential store - user records and password checks

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::OnceCell;

use crate::auth::{hash_password, verify_password, MAX_PASSWORD_BYTES};
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User, UserRecord};

const USER_COLUMNS: &str =
    "id, student_id, name, email, password_hash, program, year, created_at, updated_at";

/// Access to the `users` table
#[derive(Clone)]
pub struct CredentialStore {
    pool: SqlitePool,
    bcrypt_cost: u32,
    /// Hash compared against when the student id is unknown, so that path
    /// costs as much as a real password check.
    dummy_hash: Arc<OnceCell<String>>,
}

impl CredentialStore {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            bcrypt_cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub async fn find_by_student_id(&self, student_id: &str) -> AppResult<Option<User>> {
        Ok(self.record_by_student_id(student_id).await?.map(User::from))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(User::from))
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(User::from))
    }

    /// Hash the password and insert a new user.
    ///
    /// The UNIQUE constraints on `student_id` and `email` are authoritative;
    /// the pre-check only produces a more specific message in the common case.
    /// Passwords longer than [`MAX_PASSWORD_BYTES`] are rejected since bcrypt
    /// would silently truncate them.
    pub async fn create(&self, new_user: NewUser) -> AppResult<User> {
        if new_user.password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::Validation(format!(
                "password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        if self.record_by_student_id(&new_user.student_id).await?.is_some() {
            return Err(AppError::Conflict("Student ID already registered".to_string()));
        }

        let password_hash = hash_password(&new_user.password, self.bcrypt_cost).await?;

        let sql = format!(
            r#"
            INSERT INTO users (student_id, name, email, password_hash, program, year)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(&new_user.student_id)
            .bind(&new_user.name)
            .bind(&new_user.email)
            .bind(&password_hash)
            .bind(&new_user.program)
            .bind(new_user.year)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if AppError::is_unique_violation(&e) {
                    AppError::Conflict("Email or student ID already exists".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;

        Ok(User::from(record))
    }

    /// Check a student id / password pair.
    ///
    /// Unknown ids, wrong passwords and passwords too long to have been
    /// stored all return [`AppError::InvalidCredentials`].
    pub async fn verify(&self, student_id: &str, password: &str) -> AppResult<User> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::InvalidCredentials);
        }

        let Some(record) = self.record_by_student_id(student_id).await? else {
            let dummy = self
                .dummy_hash
                .get_or_try_init(|| hash_password("uniportal-dummy-password", self.bcrypt_cost))
                .await?;
            let _ = verify_password(password, dummy).await?;
            return Err(AppError::InvalidCredentials);
        };

        if verify_password(password, &record.password_hash).await? {
            Ok(User::from(record))
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    async fn record_by_student_id(&self, student_id: &str) -> AppResult<Option<UserRecord>> {
        let sql = format!("SELECT {} FROM users WHERE student_id = ?", USER_COLUMNS);
        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn ann() -> NewUser {
        NewUser {
            student_id: "99999".to_string(),
            name: "Ann".to_string(),
            email: "ann@u.edu".to_string(),
            password: "pw12345".to_string(),
            program: String::new(),
            year: 1,
        }
    }

    async fn store() -> CredentialStore {
        let db = Database::in_memory().await.unwrap();
        CredentialStore::new(db.pool().clone(), 4)
    }

    #[tokio::test]
    async fn create_then_lookup_by_every_key() {
        let store = store().await;
        let created = store.create(ann()).await.unwrap();
        assert_eq!(created.student_id, "99999");
        assert_eq!(created.year, Some(1));

        let by_student = store.find_by_student_id("99999").await.unwrap().unwrap();
        let by_email = store.find_by_email("ann@u.edu").await.unwrap().unwrap();
        let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_student, created);
        assert_eq!(by_email, created);
        assert_eq!(by_id, created);
    }

    #[tokio::test]
    async fn absent_users_are_none() {
        let store = store().await;
        assert!(store.find_by_student_id("nobody").await.unwrap().is_none());
        assert!(store.find_by_email("nobody@u.edu").await.unwrap().is_none());
        assert!(store.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_student_id_conflicts() {
        let store = store().await;
        store.create(ann()).await.unwrap();

        let mut again = ann();
        again.email = "other@u.edu".to_string();
        assert!(matches!(store.create(again).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = store().await;
        store.create(ann()).await.unwrap();

        let mut again = ann();
        again.student_id = "88888".to_string();
        assert!(matches!(store.create(again).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn verify_accepts_only_the_exact_password() {
        let store = store().await;
        store.create(ann()).await.unwrap();

        let user = store.verify("99999", "pw12345").await.unwrap();
        assert_eq!(user.name, "Ann");

        for wrong in ["", "pw1234", "pw123456", "PW12345", " pw12345"] {
            assert!(matches!(
                store.verify("99999", wrong).await,
                Err(AppError::InvalidCredentials)
            ));
        }
    }

    #[tokio::test]
    async fn passwords_past_the_bcrypt_limit_are_refused() {
        let store = store().await;
        let prefix = "A".repeat(MAX_PASSWORD_BYTES);

        let mut too_long = ann();
        too_long.password = format!("{}x", prefix);
        assert!(matches!(store.create(too_long).await, Err(AppError::Validation(_))));

        // 24 three-byte characters are 72 bytes; one more tips it over
        let mut multibyte = ann();
        multibyte.password = "\u{20ac}".repeat(25);
        assert!(matches!(store.create(multibyte).await, Err(AppError::Validation(_))));

        let mut at_limit = ann();
        at_limit.password = prefix.clone();
        store.create(at_limit).await.unwrap();

        assert!(store.verify("99999", &prefix).await.is_ok());
        assert!(matches!(
            store.verify("99999", &format!("{}y", prefix)).await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn unknown_student_looks_like_wrong_password() {
        let store = store().await;
        assert!(matches!(
            store.verify("00000", "pw12345").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn stored_hash_is_not_the_password() {
        let store = store().await;
        store.create(ann()).await.unwrap();

        let (hash,): (String,) =
            sqlx::query_as("SELECT password_hash FROM users WHERE student_id = '99999'")
                .fetch_one(&store.pool)
                .await
                .unwrap();
        assert_ne!(hash, "pw12345");
        assert!(hash.starts_with("$2b$"));
    }
}
