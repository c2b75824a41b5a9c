//! Shared infrastructure for the integration tests
//!
//! Every test drives the real router against the PostgreSQL database
//! named by `DATABASE_URL`. When that variable is unset the tests skip
//! themselves instead of failing, so the unit suite stays runnable
//! without a database.
//!
//! Tests share one database, so [`TestApp::spawn`] serializes them with
//! a global lock and truncates all tables before handing the app over.

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

use taskboard_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, JwtConfig},
};
use taskboard_shared::auth::jwt::{create_token, Claims};

pub const TEST_USERNAME: &str = "email@email.com";
pub const TEST_USERNAME_2: &str = "email2@email.com";
pub const BASE_URL: &str = "/api";

const TEST_JWT_SECRET: &str = "integration-test-secret-key-0123456789abcdef";

static DB_LOCK: Mutex<()> = Mutex::const_new(());

/// Test context owning the router, the pool, and the database lock
pub struct TestApp {
    pub db: PgPool,
    pub router: Router,
    _guard: MutexGuard<'static, ()>,
}

impl TestApp {
    /// Connects, migrates, and resets the database
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub async fn spawn() -> Option<Self> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("skipping: DATABASE_URL is not set");
            return None;
        };

        let guard = DB_LOCK.lock().await;

        let db = PgPool::connect(&url)
            .await
            .expect("failed to connect to the test database");

        sqlx::migrate!("../migrations")
            .run(&db)
            .await
            .expect("failed to run migrations");

        sqlx::query(
            "TRUNCATE TABLE task_labels, tasks, labels, task_statuses, users \
             RESTART IDENTITY CASCADE",
        )
        .execute(&db)
        .await
        .expect("failed to reset tables");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                base_path: BASE_URL.to_string(),
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
                ttl_hours: 1,
            },
        };

        let router = build_router(AppState::new(db.clone(), config));

        Some(Self {
            db,
            router,
            _guard: guard,
        })
    }

    /// Sends one request through the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Bytes) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");

        (status, bytes)
    }

    /// Issues a token for the given email, the way login would
    pub fn token_for(&self, email: &str) -> String {
        let claims = Claims::new(email, Duration::hours(1));
        create_token(&claims, TEST_JWT_SECRET).expect("failed to create test token")
    }

    /// Issues a correctly signed token that expired an hour ago
    pub fn expired_token_for(&self, email: &str) -> String {
        let claims = Claims::new(email, Duration::seconds(-3600));
        create_token(&claims, TEST_JWT_SECRET).expect("failed to create test token")
    }

    /// Registers a user and returns the response body
    pub async fn register_user(&self, email: &str) -> Value {
        let (status, body) = self
            .request("POST", &format!("{BASE_URL}/users"), None, Some(user_payload(email)))
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {body:?}");

        parse_json(&body)
    }

    /// Creates a task status and returns the response body
    pub async fn create_status(&self, token: &str, name: &str) -> Value {
        let (status, body) = self
            .request(
                "POST",
                &format!("{BASE_URL}/statuses"),
                Some(token),
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "status creation failed: {body:?}");

        parse_json(&body)
    }

    /// Creates a label and returns the response body
    pub async fn create_label(&self, token: &str, name: &str) -> Value {
        let (status, body) = self
            .request(
                "POST",
                &format!("{BASE_URL}/labels"),
                Some(token),
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "label creation failed: {body:?}");

        parse_json(&body)
    }

    /// Creates a task from the given payload and returns the response body
    pub async fn create_task(&self, token: &str, payload: Value) -> Value {
        let (status, body) = self
            .request("POST", &format!("{BASE_URL}/tasks"), Some(token), Some(payload))
            .await;
        assert_eq!(status, StatusCode::CREATED, "task creation failed: {body:?}");

        parse_json(&body)
    }
}

/// Registration payload for the given email
pub fn user_payload(email: &str) -> Value {
    json!({
        "email": email,
        "firstName": "fname",
        "lastName": "lname",
        "password": "pwd"
    })
}

/// Parses a response body as JSON
pub fn parse_json(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).expect("response body is not valid JSON")
}

/// Extracts an id field from a JSON body
pub fn id_of(value: &Value) -> i64 {
    value["id"].as_i64().expect("body has no numeric id")
}
