// handlers/auth/me.rs - GET /users/me

use axum::{
    extract::{Extension, State},
    response::Json,
};

use crate::database::models::UserProfile;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /users/me - profile of the authenticated caller
pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<UserProfile>, ApiError> {
    // A token can outlive its account
    let user = state
        .users
        .get_by_id(auth_user.id)
        .await
        .map_err(|_| ApiError::unauthorized(crate::middleware::auth::NOT_LOGGED_IN))?;

    Ok(Json(UserProfile::from(&user)))
}
