//! Cluster-level records: identity, version, monitoring, and GC results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cid::Cid;
use crate::peer::PeerId;

/// Identity record for a cluster peer, returned by `GET /id`, `GET /peers`,
/// and `POST /peers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterId {
    pub id: PeerId,

    /// Multiaddresses this peer listens on.
    #[serde(default)]
    pub addresses: Vec<String>,

    /// Peers this node currently sees in the cluster.
    #[serde(default)]
    pub cluster_peers: Vec<PeerId>,

    pub version: String,

    /// Operator-chosen display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub peername: String,

    /// Set when the record describes a peer that could not be contacted.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

/// Response body for `GET /version`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Version {
    pub version: String,
}

/// One monitoring metric as emitted by a peer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metric {
    pub name: String,

    pub peer: PeerId,

    /// Metric payload, kept as an opaque string.
    pub value: String,

    /// Expiry as Unix nanoseconds; expired metrics are not `valid`.
    pub expire: i64,

    pub valid: bool,
}

/// An alert raised when a peer's metric expired without renewal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub peer: PeerId,

    pub metric_name: String,
}

/// Cluster connectivity graph, returned by `GET /health/graph`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectGraph {
    pub cluster_id: PeerId,

    /// Cluster-swarm links, keyed by the textual peer id of the origin.
    #[serde(default)]
    pub cluster_links: BTreeMap<String, Vec<PeerId>>,

    /// IPFS-swarm links, keyed the same way.
    #[serde(default)]
    pub ipfs_links: BTreeMap<String, Vec<PeerId>>,
}

/// Garbage-collection result for a single node (the *local* shape).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoGC {
    pub peer: PeerId,

    /// Content identifiers removed from the node's repo.
    #[serde(default)]
    pub keys: Vec<Cid>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

/// Garbage-collection results across the cluster (the *global* shape),
/// keyed by textual peer id. Node-scoped GC results are lifted into this
/// shape before they reach the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalRepoGC {
    pub peer_map: BTreeMap<String, RepoGC>,
}
