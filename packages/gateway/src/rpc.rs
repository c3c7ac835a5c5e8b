//! The Remote Call abstraction: the gateway's only view of the backing
//! cluster service.
//!
//! Every handler issues exactly one call through [`ClusterRpc`] per
//! request. Calls are awaited inside the handler future, so when the
//! client disconnects or times out, axum drops the future and the call is
//! cancelled with it — a call never outlives the request it serves.
//!
//! Failures arrive pre-classified as [`RpcError`] variants rather than as
//! message text, so status mapping never depends on string comparison.

use async_trait::async_trait;
use pinmesh_types::{
    Alert, Cid, ClusterId, ConnectGraph, GlobalPinInfo, GlobalRepoGC, Metric, PeerId, Pin,
    PinInfo, PinPath, RepoGC, TrackerStatus, Version,
};

/// A failure reported by the Remote Call abstraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    /// The target item is not part of the cluster state.
    #[error("not found in cluster state")]
    NotFound,

    /// Any other error surfaced by the backing service.
    #[error("{0}")]
    Domain(String),

    /// The call did not complete within its deadline.
    #[error("cluster call timed out")]
    Timeout,

    /// The request/response channel itself failed.
    #[error("cluster unreachable: {0}")]
    Transport(String),
}

/// The backing cluster service, one method per remote operation.
///
/// Status-bearing and GC-bearing operations come in two flavours: a
/// cluster-wide method returning the *global* shape natively, and a
/// `*_local` method scoped to the answering node, returning the *local*
/// shape. The gateway picks one based on the `local` query flag and
/// lifts local results into the global response contract.
///
/// Implementations must be `Send + Sync + 'static` so they can be held in
/// an `Arc<dyn ClusterRpc>` shared across request handlers.
#[async_trait]
pub trait ClusterRpc: Send + Sync + 'static {
    // --- Cluster ---------------------------------------------------------

    /// This node's identity record.
    async fn id(&self) -> Result<ClusterId, RpcError>;

    async fn version(&self) -> Result<Version, RpcError>;

    /// Identity records for every peer in the cluster.
    async fn peers(&self) -> Result<Vec<ClusterId>, RpcError>;

    async fn peer_add(&self, peer: PeerId) -> Result<ClusterId, RpcError>;

    async fn peer_remove(&self, peer: PeerId) -> Result<(), RpcError>;

    async fn connect_graph(&self) -> Result<ConnectGraph, RpcError>;

    async fn alerts(&self) -> Result<Vec<Alert>, RpcError>;

    // --- Pinset ----------------------------------------------------------

    async fn pin(&self, pin: Pin) -> Result<Pin, RpcError>;

    /// Returns [`RpcError::NotFound`] when `cid` is not in the pinset.
    async fn unpin(&self, cid: Cid) -> Result<Pin, RpcError>;

    async fn pin_path(&self, path: PinPath) -> Result<Pin, RpcError>;

    /// Returns [`RpcError::NotFound`] when the resolved cid is not in the
    /// pinset.
    async fn unpin_path(&self, path: PinPath) -> Result<Pin, RpcError>;

    /// The full pin list. Type filtering happens gateway-side.
    async fn pins(&self) -> Result<Vec<Pin>, RpcError>;

    async fn pin_get(&self, cid: Cid) -> Result<Pin, RpcError>;

    // --- Status ----------------------------------------------------------

    /// Cluster-wide status of all pins matching `filter` (the empty mask
    /// means unfiltered and is forwarded as given).
    async fn status_all(&self, filter: TrackerStatus) -> Result<Vec<GlobalPinInfo>, RpcError>;

    /// Node-scoped variant of [`status_all`](Self::status_all).
    async fn status_all_local(&self, filter: TrackerStatus) -> Result<Vec<PinInfo>, RpcError>;

    async fn status(&self, cid: Cid) -> Result<GlobalPinInfo, RpcError>;

    async fn status_local(&self, cid: Cid) -> Result<PinInfo, RpcError>;

    // --- Recovery --------------------------------------------------------

    async fn recover_all(&self) -> Result<Vec<GlobalPinInfo>, RpcError>;

    async fn recover_all_local(&self) -> Result<Vec<PinInfo>, RpcError>;

    async fn recover(&self, cid: Cid) -> Result<GlobalPinInfo, RpcError>;

    async fn recover_local(&self, cid: Cid) -> Result<PinInfo, RpcError>;

    // --- GC --------------------------------------------------------------

    async fn repo_gc(&self) -> Result<GlobalRepoGC, RpcError>;

    async fn repo_gc_local(&self) -> Result<RepoGC, RpcError>;

    // --- Monitoring ------------------------------------------------------

    async fn latest_metrics(&self, name: &str) -> Result<Vec<Metric>, RpcError>;

    async fn metric_names(&self) -> Result<Vec<String>, RpcError>;
}
