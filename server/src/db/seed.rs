//! Demo users and courses inserted on first run

use sqlx::SqlitePool;
use tracing::info;

use crate::auth::hash_password;
use crate::error::AppResult;

/// Password shared by every demo account
pub const DEMO_PASSWORD: &str = "password123";

struct DemoUser {
    student_id: &'static str,
    name: &'static str,
    email: &'static str,
    program: &'static str,
    year: i64,
}

struct DemoCourse {
    code: &'static str,
    name: &'static str,
    description: &'static str,
    credits: i64,
    instructor: &'static str,
    semester: &'static str,
}

const DEMO_USERS: [DemoUser; 3] = [
    DemoUser {
        student_id: "12345",
        name: "John Doe",
        email: "john.doe@university.edu",
        program: "Computer Science",
        year: 3,
    },
    DemoUser {
        student_id: "67890",
        name: "Jane Smith",
        email: "jane.smith@university.edu",
        program: "Business Administration",
        year: 2,
    },
    DemoUser {
        student_id: "11111",
        name: "Bob Johnson",
        email: "bob.johnson@university.edu",
        program: "Engineering",
        year: 4,
    },
];

const DEMO_COURSES: [DemoCourse; 3] = [
    DemoCourse {
        code: "CS101",
        name: "Introduction to Computer Science",
        description: "Basic programming concepts",
        credits: 3,
        instructor: "Dr. Smith",
        semester: "Fall 2024",
    },
    DemoCourse {
        code: "CS201",
        name: "Data Structures",
        description: "Advanced data structures and algorithms",
        credits: 4,
        instructor: "Dr. Johnson",
        semester: "Spring 2025",
    },
    DemoCourse {
        code: "MATH101",
        name: "Calculus I",
        description: "Differential and integral calculus",
        credits: 4,
        instructor: "Prof. Davis",
        semester: "Fall 2024",
    },
];

/// Seed demo data when the users table is empty.
///
/// Returns `true` if rows were inserted. Hashing happens before the
/// transaction opens so no connection is held during bcrypt work.
pub async fn seed_demo_data(pool: &SqlitePool, bcrypt_cost: u32) -> AppResult<bool> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(false);
    }

    let mut hashes = Vec::with_capacity(DEMO_USERS.len());
    for _ in &DEMO_USERS {
        hashes.push(hash_password(DEMO_PASSWORD, bcrypt_cost).await?);
    }

    let mut tx = pool.begin().await?;

    for (user, hash) in DEMO_USERS.iter().zip(&hashes) {
        sqlx::query(
            r#"
            INSERT INTO users (student_id, name, email, password_hash, program, year)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.student_id)
        .bind(user.name)
        .bind(user.email)
        .bind(hash)
        .bind(user.program)
        .bind(user.year)
        .execute(&mut *tx)
        .await?;
    }

    for course in &DEMO_COURSES {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO courses (course_code, course_name, description, credits, instructor, semester)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(course.code)
        .bind(course.name)
        .bind(course.description)
        .bind(course.credits)
        .bind(course.instructor)
        .bind(course.semester)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        users = DEMO_USERS.len(),
        courses = DEMO_COURSES.len(),
        "database initialized with demo data"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test]
    async fn seeds_once() {
        let db = Database::in_memory().await.unwrap();

        assert!(seed_demo_data(db.pool(), 4).await.unwrap());
        assert!(!seed_demo_data(db.pool(), 4).await.unwrap());

        let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let (courses,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM courses")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(users, 3);
        assert_eq!(courses, 3);
    }
}
