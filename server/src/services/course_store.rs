//! Course and enrollment store

use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::{Course, EnrollmentWithCourse};

const COURSE_COLUMNS: &str =
    "id, course_code, course_name, description, credits, instructor, semester, created_at";

/// Read-mostly access to `courses` and `enrollments`
#[derive(Clone)]
pub struct CourseStore {
    pool: SqlitePool,
}

impl CourseStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All courses, ordered by course code
    pub async fn list_courses(&self) -> AppResult<Vec<Course>> {
        let sql = format!("SELECT {} FROM courses ORDER BY course_code", COURSE_COLUMNS);
        let courses = sqlx::query_as::<_, Course>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(courses)
    }

    pub async fn get_course_by_id(&self, id: i64) -> AppResult<Option<Course>> {
        let sql = format!("SELECT {} FROM courses WHERE id = ?", COURSE_COLUMNS);
        let course = sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(course)
    }

    /// Enroll the student with the given student id in a course.
    ///
    /// Returns the new enrollment id. Enrolling the same pair twice is a
    /// [`AppError::Conflict`] raised by the UNIQUE(student_id, course_id)
    /// constraint.
    pub async fn enroll(&self, student_id: &str, course_id: i64) -> AppResult<i64> {
        let user_id = self.resolve_student(student_id).await?;

        if self.get_course_by_id(course_id).await?.is_none() {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        let result = sqlx::query("INSERT INTO enrollments (student_id, course_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(course_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if AppError::is_unique_violation(&e) {
                    AppError::Conflict("Student is already enrolled in this course".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;

        tracing::info!(student_id, course_id, "student enrolled");
        Ok(result.last_insert_rowid())
    }

    /// Enrollments of a student joined with course details, ordered by course code
    pub async fn list_enrollments(&self, student_id: &str) -> AppResult<Vec<EnrollmentWithCourse>> {
        let user_id = self.resolve_student(student_id).await?;

        let enrollments = sqlx::query_as::<_, EnrollmentWithCourse>(
            r#"
            SELECT
                e.id, e.student_id, e.course_id, e.grade, e.enrolled_at,
                c.course_code, c.course_name, c.description, c.credits,
                c.instructor, c.semester
            FROM enrollments e
            JOIN courses c ON e.course_id = c.id
            WHERE e.student_id = ?
            ORDER BY c.course_code
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }

    /// Map a student id to the internal user id
    async fn resolve_student(&self, student_id: &str) -> AppResult<i64> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT id FROM users WHERE student_id = ?")
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|(id,)| id)
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }
}
