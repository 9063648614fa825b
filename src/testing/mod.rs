use axum::Router;

use crate::auth::{generate_jwt, Claims};
use crate::config::AppConfig;
use crate::database::models::User;
use crate::database::{DatabaseManager, NewUser};
use crate::routes::app;
use crate::state::AppState;

/// In-memory application state with helpers for seeding users and tokens
pub struct TestContext {
    pub state: AppState,
}

/// A registered user together with a bearer token issued for them
#[derive(Debug, Clone)]
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestContext {
    pub async fn new() -> anyhow::Result<Self> {
        let db = DatabaseManager::in_memory()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open test database: {}", e))?;

        Ok(Self {
            state: AppState::new(AppConfig::in_memory(), db),
        })
    }

    pub fn router(&self) -> Router {
        app(self.state.clone())
    }

    /// Register `username` with a fixed password and mint a token for it
    pub async fn create_user(&self, username: &str, display_name: &str) -> anyhow::Result<TestUser> {
        let user = self
            .state
            .users
            .create(&NewUser {
                username: username.to_string(),
                password: "password".to_string(),
                display_name: display_name.to_string(),
                email: Some(format!("{}@test.com", username)),
            })
            .await?;

        let token = self.token_for(&user)?;
        Ok(TestUser { user, token })
    }

    pub fn token_for(&self, user: &User) -> anyhow::Result<String> {
        let security = &self.state.config.security;
        let claims = Claims::new(user, security.jwt_expiry_hours);
        Ok(generate_jwt(&claims, security)?)
    }
}
