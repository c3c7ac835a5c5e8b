//! Peer management handlers — `GET /peers`, `POST /peers`, and
//! `DELETE /peers/{peer}`.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use pinmesh_types::{ClusterId, PeerAddBody, PeerId};

use crate::error::ApiError;

use super::AppState;

/// `GET /peers` — identity records of every cluster peer.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ClusterId>>, ApiError> {
    let peers = state.rpc.peers().await?;
    Ok(Json(peers))
}

/// `POST /peers` — join a new peer to the cluster.
///
/// The body must be a JSON object with a `peer_id` field. A body that
/// does not decode and a peer id that does not decode both yield 400,
/// with distinguishing messages, and neither reaches the backing service.
pub async fn add(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ClusterId>, ApiError> {
    let body: PeerAddBody = serde_json::from_slice(&body)
        .map_err(|_| ApiError::InvalidBody("error decoding request body".into()))?;

    let peer: PeerId = body
        .peer_id
        .parse()
        .map_err(|_| ApiError::BadRequest("error decoding peer_id".into()))?;

    let id = state.rpc.peer_add(peer).await?;
    Ok(Json(id))
}

/// `DELETE /peers/{peer}` — remove a peer from the cluster.
pub async fn remove(
    State(state): State<AppState>,
    Path(peer): Path<String>,
) -> Result<StatusCode, ApiError> {
    let peer: PeerId = peer.parse()?;
    state.rpc.peer_remove(peer).await?;
    Ok(StatusCode::NO_CONTENT)
}
