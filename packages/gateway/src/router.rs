//! Assembles the axum [`Router`] from all handler modules.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{add, cluster, health, metrics, peers, pins, AppState},
    rpc::ClusterRpc,
    upload::Uploader,
};

/// Build the complete gateway router over the injected collaborators.
///
/// The pin-path routes are registered per namespace tag, so an unknown
/// tag falls through to the single-segment `{cid}` routes or 404s at the
/// router without reaching any handler.
pub fn build_router(rpc: Arc<dyn ClusterRpc>, uploader: Arc<dyn Uploader>) -> Router {
    let state = AppState { rpc, uploader };

    Router::new()
        // Cluster
        .route("/id", get(cluster::id))
        .route("/version", get(cluster::version))
        // Peers
        .route("/peers", get(peers::list).post(peers::add))
        .route("/peers/{peer}", delete(peers::remove))
        // Content ingestion
        .route("/add", post(add::add))
        // Allocations
        .route("/allocations", get(pins::allocations))
        .route("/allocations/{cid}", get(pins::allocation))
        // Pinset status and recovery
        .route("/pins", get(pins::status_all))
        .route("/pins/recover", post(pins::recover_all))
        .route(
            "/pins/{cid}",
            get(pins::status).post(pins::pin).delete(pins::unpin),
        )
        .route("/pins/{cid}/recover", post(pins::recover))
        // Path-style pinning, one route per namespace tag
        .route(
            "/pins/ipfs/{*path}",
            post(pins::pin_path_ipfs).delete(pins::unpin_path_ipfs),
        )
        .route(
            "/pins/ipns/{*path}",
            post(pins::pin_path_ipns).delete(pins::unpin_path_ipns),
        )
        .route(
            "/pins/ipld/{*path}",
            post(pins::pin_path_ipld).delete(pins::unpin_path_ipld),
        )
        // GC and health
        .route("/ipfs/gc", post(health::repo_gc))
        .route("/health/graph", get(health::graph))
        .route("/health/alerts", get(health::alerts))
        // Monitoring
        .route("/monitor/metrics", get(metrics::names))
        .route("/monitor/metrics/{name}", get(metrics::latest))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
