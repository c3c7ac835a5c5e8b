//! Monitoring handlers — `GET /monitor/metrics/{name}` and
//! `GET /monitor/metrics`.

use axum::{
    extract::{Path, State},
    Json,
};
use pinmesh_types::Metric;

use crate::error::ApiError;

use super::AppState;

/// `GET /monitor/metrics/{name}` — the latest metrics with that name,
/// one per peer.
pub async fn latest(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Metric>>, ApiError> {
    let metrics = state.rpc.latest_metrics(&name).await?;
    Ok(Json(metrics))
}

/// `GET /monitor/metrics` — the metric names the monitor knows about.
pub async fn names(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let names = state.rpc.metric_names().await?;
    Ok(Json(names))
}
