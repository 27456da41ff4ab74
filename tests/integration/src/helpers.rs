//! Test helpers for integration tests
//!
//! Provides a test server bound to a loopback port and request shortcuts.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use trpg_api::{create_app, AppState};
use trpg_common::{AppConfig, JwtService};
use trpg_service::testing::InMemoryStore;

/// Secret used to sign tokens in tests
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: InMemoryStore,
    jwt_service: Arc<JwtService>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server over an empty in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let store = InMemoryStore::new();
        let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.token_expiry));
        let state = AppState::new(store.service_context_with(jwt_service.clone()), config);
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            store,
            jwt_service,
            handle,
        })
    }

    /// JWT service shared with the server, for minting custom tokens
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token and JSON body
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_auth_empty(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token and JSON body
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token and no body
    pub async fn put_auth_empty(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Configuration for a test server; no database is contacted
pub fn test_config() -> Result<AppConfig> {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("DATABASE_URL", "postgres://unused@localhost/unused"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("RATE_LIMIT_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
        ("LOG_LEVEL", "warn"),
    ]);

    AppConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()))
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Assert the status and envelope `code`, returning the whole envelope
pub async fn assert_envelope(response: Response, expected_status: StatusCode) -> Result<Value> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected_status {
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }

    let envelope: Value = serde_json::from_str(&body)?;
    if envelope["code"] != expected_status.as_u16() {
        anyhow::bail!("Envelope code does not mirror status {}: {}", expected_status, body);
    }
    Ok(envelope)
}

/// Assert a successful envelope and return its `data`
pub async fn assert_ok(response: Response) -> Result<Value> {
    let mut envelope = assert_envelope(response, StatusCode::OK).await?;
    Ok(envelope["data"].take())
}

/// Assert response status without inspecting the body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    assert_envelope(response, expected_status).await.map(|_| ())
}
