//! Health handlers — `GET /health/graph`, `GET /health/alerts`, and
//! `POST /ipfs/gc`.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use pinmesh_types::{parse_bool_flag, Alert, ConnectGraph, GlobalRepoGC};

use crate::error::ApiError;
use crate::shape;

use super::AppState;

/// `GET /health/graph` — the cluster connectivity graph.
pub async fn graph(State(state): State<AppState>) -> Result<Json<ConnectGraph>, ApiError> {
    let graph = state.rpc.connect_graph().await?;
    Ok(Json(graph))
}

/// `GET /health/alerts` — expired-metric alerts seen by this node.
pub async fn alerts(State(state): State<AppState>) -> Result<Json<Vec<Alert>>, ApiError> {
    let alerts = state.rpc.alerts().await?;
    Ok(Json(alerts))
}

/// `POST /ipfs/gc?local=` — trigger repo garbage collection.
///
/// The local variant returns a single node's result, lifted into the
/// per-peer map so both modes share one response contract.
pub async fn repo_gc(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<GlobalRepoGC>, ApiError> {
    let local = parse_bool_flag("local", query.get("local").map(String::as_str))?;

    let gc = if local {
        shape::repo_gc_to_global(state.rpc.repo_gc_local().await?)
    } else {
        state.rpc.repo_gc().await?
    };
    Ok(Json(gc))
}
