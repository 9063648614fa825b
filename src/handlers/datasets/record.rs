// handlers/datasets/record.rs - GET/PUT/DELETE /datasets/:dataset_id
//
// The dataset is resolved by the `dataset_by_id` middleware before any of
// these run, so a missing record never reaches a handler.

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    response::Json,
};

use crate::database::models::{Dataset, DatasetPatch};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /datasets/:dataset_id
pub async fn get(Extension(dataset): Extension<Dataset>) -> Json<Dataset> {
    Json(dataset)
}

/// PUT /datasets/:dataset_id - merge name, description and size onto the record
pub async fn put(
    State(state): State<AppState>,
    Extension(dataset): Extension<Dataset>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<DatasetPatch>, JsonRejection>,
) -> Result<Json<Dataset>, ApiError> {
    let Json(patch) = payload?;
    let updated = state.datasets.update(&dataset, &patch).await?;
    tracing::info!("User {} updated dataset {}", auth_user.id, updated.id);
    Ok(Json(updated))
}

/// DELETE /datasets/:dataset_id - responds with the state before removal
pub async fn delete(
    State(state): State<AppState>,
    Extension(dataset): Extension<Dataset>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<Dataset>, ApiError> {
    let removed = state.datasets.remove(&dataset).await?;
    tracing::info!("User {} deleted dataset {}", auth_user.id, removed.id);
    Ok(Json(removed))
}
