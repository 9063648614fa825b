// handlers/datasets/collection.rs - GET/POST /datasets

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    response::Json,
};

use crate::database::models::{Dataset, DatasetInput};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /datasets - every dataset, newest first
pub async fn get(State(state): State<AppState>) -> Result<Json<Vec<Dataset>>, ApiError> {
    let datasets = state.datasets.list().await?;
    tracing::debug!("Listing {} datasets", datasets.len());
    Ok(Json(datasets))
}

/// POST /datasets - create a dataset owned by the caller
///
/// Any `user`/`owner`, `created` or `_id` in the body is dropped by
/// `DatasetInput`; the owner is always the authenticated caller.
pub async fn post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<DatasetInput>, JsonRejection>,
) -> Result<Json<Dataset>, ApiError> {
    let Json(input) = payload?;
    let dataset = state.datasets.create(&input, auth_user.id).await?;
    tracing::info!("User {} created dataset {}", auth_user.id, dataset.id);
    Ok(Json(dataset))
}
