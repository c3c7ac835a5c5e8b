//! Domain values and request/response types for the pinmesh REST gateway.
//!
//! This crate encodes the HTTP API contract of a pinmesh cluster node as
//! Rust types, together with the parsing rules that turn raw path and
//! query strings into validated domain values. It is consumed by the
//! gateway crate (which dispatches requests) and by the conformance
//! suite (which checks the contract from the outside).
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | GET | `/id` | → [`ClusterId`] |
//! | GET | `/version` | → [`Version`] |
//! | GET | `/peers` | → `Vec<`[`ClusterId`]`>` |
//! | POST | `/peers` | [`PeerAddBody`] → [`ClusterId`] |
//! | DELETE | `/peers/{peer}` | → `204` |
//! | POST | `/add` | [`AddParams`] (query) + multipart body |
//! | GET | `/allocations` | → `Vec<`[`Pin`]`>` (filtered by [`PinType`]) |
//! | GET | `/allocations/{cid}` | → [`Pin`] |
//! | GET | `/pins` | → `Vec<`[`GlobalPinInfo`]`>` |
//! | GET | `/pins/{cid}` | → [`GlobalPinInfo`] |
//! | POST/DELETE | `/pins/{cid}` | → [`Pin`] |
//! | POST/DELETE | `/pins/{ipfs\|ipns\|ipld}/{path}` | → [`Pin`] |
//! | POST | `/pins/{cid}/recover`, `/pins/recover` | → [`GlobalPinInfo`] |
//! | POST | `/ipfs/gc` | → [`GlobalRepoGC`] |
//! | GET | `/health/graph` | → [`ConnectGraph`] |
//! | GET | `/health/alerts` | → `Vec<`[`Alert`]`>` |
//! | GET | `/monitor/metrics/{name}` | → `Vec<`[`Metric`]`>` |
//! | GET | `/monitor/metrics` | → `Vec<String>` |

pub mod add;
pub mod cid;
pub mod cluster;
pub mod error;
pub mod peer;
pub mod pin;
pub mod query;
pub mod status;

pub use add::AddParams;
pub use cid::Cid;
pub use cluster::{Alert, ClusterId, ConnectGraph, GlobalRepoGC, Metric, RepoGC, Version};
pub use error::{ErrorResponse, ParseError};
pub use peer::{PeerAddBody, PeerId};
pub use pin::{Pin, PinNamespace, PinOptions, PinPath, PinType};
pub use query::parse_bool_flag;
pub use status::{GlobalPinInfo, PinInfo, TrackerStatus};
