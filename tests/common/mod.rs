#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use dataset_api::config::AppConfig;
use dataset_api::database::DatabaseManager;
use dataset_api::{app, AppState};

/// Server running inside the test's own runtime with a private in-memory database
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let db = DatabaseManager::in_memory()
            .await
            .context("failed to open in-memory database")?;
        let state = AppState::new(AppConfig::in_memory(), db);

        // Port 0 lets the OS pick a free port for isolation
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let base_url = format!("http://{}", listener.local_addr()?);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app(state)).await {
                eprintln!("test server stopped: {}", e);
            }
        });

        let server = Self {
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a user through the API and return the issued token
    pub async fn signup(&self, username: &str, display_name: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/auth/signup"))
            .json(&json!({
                "username": username,
                "password": "password",
                "displayName": display_name,
                "email": format!("{}@test.com", username),
            }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "signup failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("signup response missing token")
    }
}
