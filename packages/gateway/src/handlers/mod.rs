//! HTTP request handlers for all gateway endpoints.
//!
//! Each submodule covers a logical group of operations. Handlers are pure
//! async functions that receive axum extractors and return
//! `Result<impl IntoResponse, ApiError>`. Every handler decodes its
//! parameters first and issues at most one remote call; a request with
//! invalid parameters never reaches the backing service.

pub mod add;
pub mod cluster;
pub mod health;
pub mod metrics;
pub mod peers;
pub mod pins;

use std::sync::Arc;

use crate::rpc::ClusterRpc;
use crate::upload::Uploader;

/// Shared application state threaded through all handlers via
/// [`axum::extract::State`]. Holds only the two injected collaborators;
/// everything else is constructed fresh per request.
#[derive(Clone)]
pub struct AppState {
    pub rpc: Arc<dyn ClusterRpc>,
    pub uploader: Arc<dyn Uploader>,
}
