//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use serde::Serialize;
use serde_json::{json, Value};

use crate::helpers::{assert_ok, TestServer};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Password used by every generated account
pub const TEST_PASSWORD: &str = "secret123";

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

impl RegisterRequest {
    pub fn unique(nickname: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("{}{suffix}@example.com", nickname.to_lowercase()),
            password: TEST_PASSWORD.to_string(),
            nickname: nickname.to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// A registered and logged-in account
#[derive(Debug, Clone)]
pub struct TestUser {
    pub user_id: String,
    pub email: String,
    pub token: String,
}

impl TestUser {
    /// Register a fresh account and log it in
    pub async fn create(server: &TestServer, nickname: &str) -> Result<Self> {
        let register = RegisterRequest::unique(nickname);
        assert_ok(server.post("/api/v1/auth/register", &register).await?).await?;

        let login = assert_ok(
            server
                .post("/api/v1/auth/login", &LoginRequest::from_register(&register))
                .await?,
        )
        .await?;

        Ok(Self {
            user_id: string_field(&login, "user_id")?,
            email: register.email,
            token: string_field(&login, "token")?,
        })
    }
}

/// Create a room owned by `owner` and return its `data`
pub async fn create_room(server: &TestServer, owner: &TestUser, body: Value) -> Result<Value> {
    assert_ok(server.post_auth("/api/v1/rooms", &owner.token, &body).await?).await
}

/// Create a room with only a name
pub async fn create_named_room(server: &TestServer, owner: &TestUser, name: &str) -> Result<Value> {
    create_room(server, owner, json!({ "name": name })).await
}

/// Join a room by id without a password
pub async fn join_room(server: &TestServer, user: &TestUser, room_id: &str) -> Result<Value> {
    assert_ok(
        server
            .post_auth_empty(&format!("/api/v1/rooms/{room_id}/join"), &user.token)
            .await?,
    )
    .await
}

/// Read a string field from a JSON object
pub fn string_field(value: &Value, field: &str) -> Result<String> {
    value[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("missing string field `{field}` in {value}"))
}
