use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::api::ApiClient;
use super::error::ClientError;
use crate::database::models::UserProfile;

#[derive(Debug, Clone, Serialize)]
pub struct SignupPayload {
    pub username: String,
    pub password: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

impl ApiClient {
    pub async fn signup(&self, payload: &SignupPayload) -> Result<Session, ClientError> {
        self.send(self.request(Method::POST, "/auth/signup").json(payload))
            .await
    }

    pub async fn signin(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let body = serde_json::json!({ "username": username, "password": password });
        self.send(self.request(Method::POST, "/auth/signin").json(&body))
            .await
    }

    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.send(self.request(Method::GET, "/users/me")).await
    }
}
