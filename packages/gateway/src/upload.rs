//! The uploader seam for the multipart `POST /add` route.

use async_trait::async_trait;
use axum::extract::Multipart;
use axum::response::Response;
use pinmesh_types::AddParams;

/// Streaming multipart-to-pin collaborator.
///
/// The add route is the one operation that does not go through
/// [`ClusterRpc`](crate::rpc::ClusterRpc): after the gateway has validated
/// the query parameters, the uploader consumes the multipart body
/// incrementally and owns writing the response (including any trailer)
/// for that route. Back-pressure and partial-failure semantics live
/// behind this trait.
#[async_trait]
pub trait Uploader: Send + Sync + 'static {
    async fn add(&self, params: AddParams, body: Multipart) -> Response;
}
