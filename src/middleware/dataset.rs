use axum::{
    extract::{Extension, Path, Request, State},
    middleware::Next,
    response::Response,
};

use super::auth::AuthUser;
use crate::database::models::Dataset;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;

pub const NOT_AUTHORIZED: &str = "User is not authorized";

/// Resolves the `:dataset_id` path segment before any handler or gate runs.
/// The loaded dataset is attached to the request as an extension.
pub async fn dataset_by_id(
    State(state): State<AppState>,
    Path(dataset_id): Path<String>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let dataset = state
        .datasets
        .find_by_key(&dataset_id)
        .await
        .map_err(|e| match e {
            DatabaseError::NotFound(_) => {
                tracing::debug!("Dataset lookup for {} failed: {}", dataset_id, e);
                ApiError::not_found(format!("Failed to load Dataset {}", dataset_id))
            }
            other => ApiError::from(other),
        })?;

    request.extensions_mut().insert(dataset);
    Ok(next.run(request).await)
}

/// Ownership gate for mutations: only the creator may change a dataset.
pub async fn has_authorization(
    Extension(dataset): Extension<Dataset>,
    Extension(auth_user): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !is_owner(&dataset, &auth_user) {
        tracing::info!(
            "User {} denied access to dataset {} owned by {}",
            auth_user.id,
            dataset.id,
            dataset.owner.id
        );
        return Err(ApiError::forbidden(NOT_AUTHORIZED));
    }

    Ok(next.run(request).await)
}

pub fn is_owner(dataset: &Dataset, user: &AuthUser) -> bool {
    dataset.owner.id == user.id
}
