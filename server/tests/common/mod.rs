#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;

use uniportal_server::db::{seed_demo_data, Database};
use uniportal_server::{build_router, AppState};

pub const SECRET: &str = "integration-test-secret";
pub const BCRYPT_COST: u32 = 4;

pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

/// Router over a seeded in-memory database
pub async fn test_app() -> TestApp {
    let db = Database::in_memory().await.expect("in-memory database");
    seed_demo_data(db.pool(), BCRYPT_COST)
        .await
        .expect("seed demo data");

    let state = AppState::from_parts(&db, SECRET, Duration::hours(24), BCRYPT_COST);
    TestApp {
        router: build_router(state, &[]),
        db,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Log in as a demo student and return the token
    pub async fn login(&self, student_id: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/api/auth/login",
                serde_json::json!({ "student_id": student_id, "password": password }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }
}
