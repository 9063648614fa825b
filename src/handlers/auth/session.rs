// handlers/auth/session.rs - POST /auth/signup, POST /auth/signin

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{generate_jwt, password, Claims};
use crate::database::models::{User, UserProfile};
use crate::database::NewUser;
use crate::error::ApiError;
use crate::state::AppState;

pub const INVALID_CREDENTIALS: &str = "Unknown user or invalid password";

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Issued token plus the profile it was issued for
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserProfile,
}

/// POST /auth/signup - register a user and sign them in
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(request) = payload?;

    password::validate_username_format(&request.username).map_err(ApiError::bad_request)?;
    password::validate_password_strength(&request.password).map_err(ApiError::bad_request)?;
    if request.display_name.trim().is_empty() {
        return Err(ApiError::bad_request("Please fill in your display name"));
    }

    let user = state
        .users
        .create(&NewUser {
            username: request.username,
            password: request.password,
            display_name: request.display_name,
            email: request.email.filter(|e| !e.trim().is_empty()),
        })
        .await?;

    tracing::info!("Registered user {} ({})", user.username, user.id);
    issue_session(&state, &user).map(Json)
}

/// POST /auth/signin - exchange credentials for a token
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(request) = payload?;

    let user = state
        .users
        .authenticate(&request.username, &request.password)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Failed sign-in attempt for '{}'", request.username);
            ApiError::bad_request(INVALID_CREDENTIALS)
        })?;

    tracing::info!("User {} signed in", user.username);
    issue_session(&state, &user).map(Json)
}

fn issue_session(state: &AppState, user: &User) -> Result<SessionResponse, ApiError> {
    let security = &state.config.security;
    let claims = Claims::new(user, security.jwt_expiry_hours);
    let token = generate_jwt(&claims, security).map_err(|e| {
        tracing::error!("Token generation failed: {}", e);
        ApiError::internal_server_error("Failed to issue session token")
    })?;

    Ok(SessionResponse {
        token,
        user: UserProfile::from(user),
    })
}
