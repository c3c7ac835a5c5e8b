//! Public surface for the `pinmesh-gateway` crate.
//!
//! The gateway is the request-translation boundary of a pinmesh cluster:
//! it validates and decodes HTTP parameters into domain values, issues
//! exactly one call against the backing cluster service, and reshapes the
//! result into the HTTP response contract. The backing service itself is
//! reached through the [`ClusterRpc`] trait; the embedding cluster binary
//! supplies the concrete transport along with the listener lifecycle.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod rpc;
pub mod shape;
pub mod upload;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use router::build_router;
pub use rpc::{ClusterRpc, RpcError};
pub use upload::Uploader;
