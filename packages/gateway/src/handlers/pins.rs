//! Pinset handlers — allocations, pin/unpin (by cid and by path), status,
//! and recovery.
//!
//! # Local vs global
//!
//! The status and recovery operations exist in a node-scoped ("local")
//! and a cluster-wide ("global") remote variant, selected with the
//! `?local=true` query flag. Whichever variant runs, the response always
//! carries the global shape: local results are lifted into a one-entry
//! peer map keyed by the responding node (see [`crate::shape`]).

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use pinmesh_types::{
    parse_bool_flag, Cid, GlobalPinInfo, Pin, PinNamespace, PinOptions, PinPath, PinType,
    TrackerStatus,
};

use crate::error::ApiError;
use crate::rpc::RpcError;
use crate::shape;

use super::AppState;

fn local_flag(query: &HashMap<String, String>) -> Result<bool, ApiError> {
    Ok(parse_bool_flag("local", query.get("local").map(String::as_str))?)
}

// ---------------------------------------------------------------------------
// Allocations
// ---------------------------------------------------------------------------

/// `GET /allocations?filter=` — the cluster pin list, restricted to the
/// requested pin categories.
///
/// The filter is validated before the remote call and applied to the
/// result after it; the error path is never filtered.
pub async fn allocations(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Pin>>, ApiError> {
    let filter = PinType::from_filter(query.get("filter").map(String::as_str).unwrap_or(""))?;

    let pins = state.rpc.pins().await?;
    Ok(Json(shape::filter_pins(pins, filter)))
}

/// `GET /allocations/{cid}` — a single pin entry.
///
/// Any backend failure here means the cid is not part of the pinset, so
/// errors map to 404.
pub async fn allocation(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> Result<Json<Pin>, ApiError> {
    let cid: Cid = cid.parse()?;

    match state.rpc.pin_get(cid).await {
        Ok(pin) => Ok(Json(pin)),
        Err(e) => Err(ApiError::NotFound(e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Pin / unpin by cid
// ---------------------------------------------------------------------------

/// `POST /pins/{cid}` — pin a cid, with options taken from the query.
pub async fn pin(
    State(state): State<AppState>,
    Path(cid): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Pin>, ApiError> {
    let cid: Cid = cid.parse()?;
    let opts = PinOptions::from_query(&query)?;
    tracing::debug!(%cid, "pin");

    let pin = state.rpc.pin(Pin::with_options(cid, opts)).await?;
    Ok(Json(pin))
}

/// `DELETE /pins/{cid}` — unpin a cid.
///
/// An unknown cid yields 404; every other backend failure follows the
/// automatic status policy.
pub async fn unpin(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> Result<Json<Pin>, ApiError> {
    let cid: Cid = cid.parse()?;
    tracing::debug!(%cid, "unpin");

    match state.rpc.unpin(cid).await {
        Err(RpcError::NotFound) => Err(ApiError::NotFound(RpcError::NotFound.to_string())),
        other => Ok(Json(other?)),
    }
}

// ---------------------------------------------------------------------------
// Pin / unpin by path
// ---------------------------------------------------------------------------
//
// The route table registers one static-prefix route per namespace tag, so
// any other tag never reaches these handlers.

async fn pin_path(
    state: AppState,
    namespace: PinNamespace,
    path: String,
    query: HashMap<String, String>,
) -> Result<Json<Pin>, ApiError> {
    let opts = PinOptions::from_query(&query)?;
    let pinpath = PinPath::new(namespace, &path, opts);
    tracing::debug!(path = %pinpath, "pin path");

    let pin = state.rpc.pin_path(pinpath).await?;
    Ok(Json(pin))
}

async fn unpin_path(
    state: AppState,
    namespace: PinNamespace,
    path: String,
) -> Result<Json<Pin>, ApiError> {
    let pinpath = PinPath::new(namespace, &path, PinOptions::default());
    tracing::debug!(path = %pinpath, "unpin path");

    match state.rpc.unpin_path(pinpath).await {
        Err(RpcError::NotFound) => Err(ApiError::NotFound(RpcError::NotFound.to_string())),
        other => Ok(Json(other?)),
    }
}

/// `POST /pins/ipfs/{*path}`
pub async fn pin_path_ipfs(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Pin>, ApiError> {
    pin_path(state, PinNamespace::Ipfs, path, query).await
}

/// `POST /pins/ipns/{*path}`
pub async fn pin_path_ipns(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Pin>, ApiError> {
    pin_path(state, PinNamespace::Ipns, path, query).await
}

/// `POST /pins/ipld/{*path}`
pub async fn pin_path_ipld(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Pin>, ApiError> {
    pin_path(state, PinNamespace::Ipld, path, query).await
}

/// `DELETE /pins/ipfs/{*path}`
pub async fn unpin_path_ipfs(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<Pin>, ApiError> {
    unpin_path(state, PinNamespace::Ipfs, path).await
}

/// `DELETE /pins/ipns/{*path}`
pub async fn unpin_path_ipns(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<Pin>, ApiError> {
    unpin_path(state, PinNamespace::Ipns, path).await
}

/// `DELETE /pins/ipld/{*path}`
pub async fn unpin_path_ipld(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<Pin>, ApiError> {
    unpin_path(state, PinNamespace::Ipld, path).await
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// `GET /pins?local=&filter=` — status of all pins.
///
/// The status filter is an independent bitmask domain from the
/// allocations type filter; it is validated here and then forwarded to
/// the backing service as given (the empty mask means unfiltered).
pub async fn status_all(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<GlobalPinInfo>>, ApiError> {
    let filter =
        TrackerStatus::from_filter(query.get("filter").map(String::as_str).unwrap_or(""))?;
    let local = local_flag(&query)?;

    let infos = if local {
        let local_infos = state.rpc.status_all_local(filter).await?;
        shape::pin_infos_to_global(local_infos)
    } else {
        state.rpc.status_all(filter).await?
    };
    Ok(Json(infos))
}

/// `GET /pins/{cid}?local=` — status of one pin.
pub async fn status(
    State(state): State<AppState>,
    Path(cid): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<GlobalPinInfo>, ApiError> {
    let cid: Cid = cid.parse()?;
    let local = local_flag(&query)?;

    let info = if local {
        state.rpc.status_local(cid).await?.into_global()
    } else {
        state.rpc.status(cid).await?
    };
    Ok(Json(info))
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

/// `POST /pins/recover?local=` — re-track every pin in an error state.
pub async fn recover_all(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<GlobalPinInfo>>, ApiError> {
    let local = local_flag(&query)?;

    let infos = if local {
        let local_infos = state.rpc.recover_all_local().await?;
        shape::pin_infos_to_global(local_infos)
    } else {
        state.rpc.recover_all().await?
    };
    Ok(Json(infos))
}

/// `POST /pins/{cid}/recover?local=` — re-track one pin.
pub async fn recover(
    State(state): State<AppState>,
    Path(cid): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<GlobalPinInfo>, ApiError> {
    let cid: Cid = cid.parse()?;
    let local = local_flag(&query)?;

    let info = if local {
        state.rpc.recover_local(cid).await?.into_global()
    } else {
        state.rpc.recover(cid).await?
    };
    Ok(Json(info))
}
