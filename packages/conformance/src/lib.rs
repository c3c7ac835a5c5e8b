//! Shared helpers for the pinmesh gateway conformance suite.
//!
//! Provides [`spawn_gateway`] — binds a `TcpListener` on an ephemeral
//! port, wires up an in-process gateway over a scripted [`MockRpc`] and
//! [`MockUploader`], and returns the local URL plus both collaborators so
//! tests can seed state and assert on call counts without going through
//! the HTTP layer.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::Multipart;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use pinmesh_gateway::{build_router, ClusterRpc, RpcError, Uploader};
use pinmesh_types::{
    AddParams, Alert, Cid, ClusterId, ConnectGraph, GlobalPinInfo, GlobalRepoGC, Metric, PeerId,
    Pin, PinInfo, PinPath, PinType, RepoGC, TrackerStatus, Version,
};

/// The peer id the mock backend answers node-scoped calls as.
pub const SELF_PEER: &str = "12D3KooWQYV9dGMFoRzNStwpXztXaBUjtPqi6aU76ZgUriHhKust";

/// A second cluster member appearing in global results.
pub const OTHER_PEER: &str = "12D3KooWKRyzVWW6ChFjQjK4miCty85Niy48tpPV95XdKu1BcvMA";

/// The backing-service version the mock reports.
pub const MOCK_VERSION: &str = "0.1.0";

pub fn self_peer() -> PeerId {
    SELF_PEER.parse().expect("SELF_PEER is valid base58")
}

pub fn other_peer() -> PeerId {
    OTHER_PEER.parse().expect("OTHER_PEER is valid base58")
}

// ---------------------------------------------------------------------------
// MockRpc
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockState {
    calls: BTreeMap<&'static str, usize>,
    pins: Vec<Pin>,
    pinset: BTreeSet<Cid>,
    status_filter_seen: Option<TrackerStatus>,
    fail_next: Option<RpcError>,
}

/// A scripted, call-counting stand-in for the backing cluster service.
///
/// Behavior:
/// - `pins` serves whatever [`set_pins`](MockRpc::set_pins) seeded.
/// - `unpin`, `unpin_path`, and `pin_get` consult the seeded pinset and
///   answer [`RpcError::NotFound`] / a domain error for unknown targets.
/// - Node-scoped methods answer as [`SELF_PEER`]; cluster-wide methods
///   include [`OTHER_PEER`] as well.
/// - [`fail_next`](MockRpc::fail_next) forces the next call to fail with
///   the given error, whatever the method.
///
/// Every method records its name, so tests can assert both that a call
/// happened and that invalid input produced zero calls.
#[derive(Default)]
pub struct MockRpc {
    state: Mutex<MockState>,
}

impl MockRpc {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed the pin list served by the `pins` method.
    pub fn set_pins(&self, pins: Vec<Pin>) {
        let mut state = self.state.lock().unwrap();
        for pin in &pins {
            state.pinset.insert(pin.cid.clone());
        }
        state.pins = pins;
    }

    /// Mark a cid as part of the pinset.
    pub fn insert(&self, cid: Cid) {
        self.state.lock().unwrap().pinset.insert(cid);
    }

    /// Force the next remote call to fail with `err`.
    pub fn fail_next(&self, err: RpcError) {
        self.state.lock().unwrap().fail_next = Some(err);
    }

    /// How many times the named method was called.
    pub fn calls(&self, name: &str) -> usize {
        *self.state.lock().unwrap().calls.get(name).unwrap_or(&0)
    }

    /// Total calls across all methods.
    pub fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.values().sum()
    }

    /// The status filter the last `status_all`/`status_all_local` call
    /// received.
    pub fn status_filter_seen(&self) -> Option<TrackerStatus> {
        self.state.lock().unwrap().status_filter_seen
    }

    fn begin(&self, name: &'static str) -> Result<(), RpcError> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(name).or_insert(0) += 1;
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn contains(&self, cid: &Cid) -> bool {
        self.state.lock().unwrap().pinset.contains(cid)
    }

    fn data_pin(cid: Cid) -> Pin {
        Pin {
            cid,
            pin_type: PinType::DATA,
            allocations: vec![self_peer(), other_peer()],
            replication_factor_min: 0,
            replication_factor_max: 0,
            name: None,
        }
    }

    fn info(cid: Cid, peer: PeerId, status: TrackerStatus) -> PinInfo {
        PinInfo {
            cid,
            peer,
            status,
            timestamp: Utc::now(),
            error: String::new(),
        }
    }

    fn global(cid: Cid) -> GlobalPinInfo {
        GlobalPinInfo {
            cid: cid.clone(),
            peer_map: BTreeMap::from([
                (
                    SELF_PEER.to_string(),
                    Self::info(cid.clone(), self_peer(), TrackerStatus::PINNED),
                ),
                (
                    OTHER_PEER.to_string(),
                    Self::info(cid, other_peer(), TrackerStatus::REMOTE),
                ),
            ]),
        }
    }

    fn identity(peer: PeerId) -> ClusterId {
        ClusterId {
            id: peer,
            addresses: vec!["/ip4/127.0.0.1/tcp/9096".into()],
            cluster_peers: vec![self_peer(), other_peer()],
            version: MOCK_VERSION.into(),
            peername: "mock".into(),
            error: String::new(),
        }
    }
}

#[async_trait]
impl ClusterRpc for MockRpc {
    async fn id(&self) -> Result<ClusterId, RpcError> {
        self.begin("id")?;
        Ok(Self::identity(self_peer()))
    }

    async fn version(&self) -> Result<Version, RpcError> {
        self.begin("version")?;
        Ok(Version {
            version: MOCK_VERSION.into(),
        })
    }

    async fn peers(&self) -> Result<Vec<ClusterId>, RpcError> {
        self.begin("peers")?;
        Ok(vec![
            Self::identity(self_peer()),
            Self::identity(other_peer()),
        ])
    }

    async fn peer_add(&self, peer: PeerId) -> Result<ClusterId, RpcError> {
        self.begin("peer_add")?;
        Ok(Self::identity(peer))
    }

    async fn peer_remove(&self, _peer: PeerId) -> Result<(), RpcError> {
        self.begin("peer_remove")
    }

    async fn connect_graph(&self) -> Result<ConnectGraph, RpcError> {
        self.begin("connect_graph")?;
        Ok(ConnectGraph {
            cluster_id: self_peer(),
            cluster_links: BTreeMap::from([(SELF_PEER.to_string(), vec![other_peer()])]),
            ipfs_links: BTreeMap::new(),
        })
    }

    async fn alerts(&self) -> Result<Vec<Alert>, RpcError> {
        self.begin("alerts")?;
        Ok(vec![Alert {
            peer: other_peer(),
            metric_name: "ping".into(),
        }])
    }

    async fn pin(&self, pin: Pin) -> Result<Pin, RpcError> {
        self.begin("pin")?;
        self.insert(pin.cid.clone());
        Ok(pin)
    }

    async fn unpin(&self, cid: Cid) -> Result<Pin, RpcError> {
        self.begin("unpin")?;
        if !self.contains(&cid) {
            return Err(RpcError::NotFound);
        }
        Ok(Self::data_pin(cid))
    }

    async fn pin_path(&self, path: PinPath) -> Result<Pin, RpcError> {
        self.begin("pin_path")?;
        // Resolve to the first seeded cid, or a fixed one for fresh mocks.
        let cid = self
            .state
            .lock()
            .unwrap()
            .pinset
            .iter()
            .next()
            .cloned()
            .unwrap_or_else(|| {
                "QmS4ustL54uo8FzR9455qaxZwuMiUhyvMcX9Ba8nUH4uVv"
                    .parse()
                    .expect("fixed cid is valid")
            });
        let mut pin = Self::data_pin(cid);
        pin.name = path.opts.name;
        Ok(pin)
    }

    async fn unpin_path(&self, _path: PinPath) -> Result<Pin, RpcError> {
        self.begin("unpin_path")?;
        let first = self.state.lock().unwrap().pinset.iter().next().cloned();
        match first {
            Some(cid) => Ok(Self::data_pin(cid)),
            None => Err(RpcError::NotFound),
        }
    }

    async fn pins(&self) -> Result<Vec<Pin>, RpcError> {
        self.begin("pins")?;
        Ok(self.state.lock().unwrap().pins.clone())
    }

    async fn pin_get(&self, cid: Cid) -> Result<Pin, RpcError> {
        self.begin("pin_get")?;
        if !self.contains(&cid) {
            return Err(RpcError::Domain("cid is not part of the pinset".into()));
        }
        Ok(Self::data_pin(cid))
    }

    async fn status_all(&self, filter: TrackerStatus) -> Result<Vec<GlobalPinInfo>, RpcError> {
        self.begin("status_all")?;
        let mut state = self.state.lock().unwrap();
        state.status_filter_seen = Some(filter);
        Ok(state
            .pins
            .iter()
            .map(|p| Self::global(p.cid.clone()))
            .collect())
    }

    async fn status_all_local(&self, filter: TrackerStatus) -> Result<Vec<PinInfo>, RpcError> {
        self.begin("status_all_local")?;
        let mut state = self.state.lock().unwrap();
        state.status_filter_seen = Some(filter);
        Ok(state
            .pins
            .iter()
            .map(|p| Self::info(p.cid.clone(), self_peer(), TrackerStatus::PINNED))
            .collect())
    }

    async fn status(&self, cid: Cid) -> Result<GlobalPinInfo, RpcError> {
        self.begin("status")?;
        Ok(Self::global(cid))
    }

    async fn status_local(&self, cid: Cid) -> Result<PinInfo, RpcError> {
        self.begin("status_local")?;
        Ok(Self::info(cid, self_peer(), TrackerStatus::PINNED))
    }

    async fn recover_all(&self) -> Result<Vec<GlobalPinInfo>, RpcError> {
        self.begin("recover_all")?;
        let pins = self.state.lock().unwrap().pins.clone();
        Ok(pins.iter().map(|p| Self::global(p.cid.clone())).collect())
    }

    async fn recover_all_local(&self) -> Result<Vec<PinInfo>, RpcError> {
        self.begin("recover_all_local")?;
        let pins = self.state.lock().unwrap().pins.clone();
        Ok(pins
            .iter()
            .map(|p| Self::info(p.cid.clone(), self_peer(), TrackerStatus::PINNED))
            .collect())
    }

    async fn recover(&self, cid: Cid) -> Result<GlobalPinInfo, RpcError> {
        self.begin("recover")?;
        Ok(Self::global(cid))
    }

    async fn recover_local(&self, cid: Cid) -> Result<PinInfo, RpcError> {
        self.begin("recover_local")?;
        Ok(Self::info(cid, self_peer(), TrackerStatus::PINNED))
    }

    async fn repo_gc(&self) -> Result<GlobalRepoGC, RpcError> {
        self.begin("repo_gc")?;
        let keys: Vec<Cid> = self.state.lock().unwrap().pinset.iter().cloned().collect();
        Ok(GlobalRepoGC {
            peer_map: BTreeMap::from([
                (
                    SELF_PEER.to_string(),
                    RepoGC {
                        peer: self_peer(),
                        keys: keys.clone(),
                        error: String::new(),
                    },
                ),
                (
                    OTHER_PEER.to_string(),
                    RepoGC {
                        peer: other_peer(),
                        keys,
                        error: String::new(),
                    },
                ),
            ]),
        })
    }

    async fn repo_gc_local(&self) -> Result<RepoGC, RpcError> {
        self.begin("repo_gc_local")?;
        Ok(RepoGC {
            peer: self_peer(),
            keys: self.state.lock().unwrap().pinset.iter().cloned().collect(),
            error: String::new(),
        })
    }

    async fn latest_metrics(&self, name: &str) -> Result<Vec<Metric>, RpcError> {
        self.begin("latest_metrics")?;
        Ok(vec![Metric {
            name: name.to_string(),
            peer: self_peer(),
            value: "1".into(),
            expire: 0,
            valid: true,
        }])
    }

    async fn metric_names(&self) -> Result<Vec<String>, RpcError> {
        self.begin("metric_names")?;
        Ok(vec!["ping".into(), "freespace".into()])
    }
}

// ---------------------------------------------------------------------------
// MockUploader
// ---------------------------------------------------------------------------

/// Uploader stand-in: counts invocations and echoes the validated
/// parameters instead of streaming anything.
#[derive(Default)]
pub struct MockUploader {
    calls: AtomicUsize,
}

impl MockUploader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Uploader for MockUploader {
    async fn add(&self, params: AddParams, _body: Multipart) -> Response {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Json(serde_json::json!({
            "name": params.opts.name,
            "shard": params.shard,
        }))
        .into_response()
    }
}

// ---------------------------------------------------------------------------
// spawn_gateway
// ---------------------------------------------------------------------------

/// Start an ephemeral in-process gateway and return
/// `(base_url, rpc, uploader)`.
///
/// The gateway runs in a background `tokio` task bound to an OS-assigned
/// port on `127.0.0.1`. The returned collaborators are the same instances
/// the gateway uses, so tests can seed state and read call counts
/// directly.
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound.
pub async fn spawn_gateway() -> (String, Arc<MockRpc>, Arc<MockUploader>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    let base_url = format!("http://{addr}");

    let rpc = MockRpc::new();
    let uploader = MockUploader::new();
    let router = build_router(
        Arc::clone(&rpc) as Arc<dyn ClusterRpc>,
        Arc::clone(&uploader) as Arc<dyn Uploader>,
    );

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance gateway error");
    });

    (base_url, rpc, uploader)
}
