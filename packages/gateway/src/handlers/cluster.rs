//! Cluster identity handlers — `GET /id` and `GET /version`.

use axum::{extract::State, Json};
use pinmesh_types::{ClusterId, Version};

use crate::error::ApiError;

use super::AppState;

/// `GET /id` — this node's identity record.
pub async fn id(State(state): State<AppState>) -> Result<Json<ClusterId>, ApiError> {
    let id = state.rpc.id().await?;
    Ok(Json(id))
}

/// `GET /version` — the cluster service version.
pub async fn version(State(state): State<AppState>) -> Result<Json<Version>, ApiError> {
    let v = state.rpc.version().await?;
    Ok(Json(v))
}
