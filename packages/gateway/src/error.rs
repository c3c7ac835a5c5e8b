//! Application-level error type returned by handlers.
//!
//! All variants serialise to the [`ErrorResponse`] JSON body and map to
//! the appropriate HTTP status code. No endpoint ever returns a 2xx with
//! a body encoding an error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pinmesh_types::error::codes;
use pinmesh_types::{ErrorResponse, ParseError};

use crate::rpc::RpcError;

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// A malformed path or query parameter. Never issued after a remote
    /// call: validation happens first.
    BadRequest(String),
    /// A request body that failed to decode.
    InvalidBody(String),
    NotFound(String),
    /// A domain error from the backing service.
    Upstream(String),
    Timeout,
    Unreachable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, codes::INVALID_PARAMETER, msg),
            ApiError::InvalidBody(msg) => (StatusCode::BAD_REQUEST, codes::INVALID_JSON, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, codes::NOT_FOUND, msg),
            ApiError::Upstream(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, codes::UPSTREAM_ERROR, msg)
            }
            ApiError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                codes::UPSTREAM_TIMEOUT,
                RpcError::Timeout.to_string(),
            ),
            ApiError::Unreachable(msg) => (
                StatusCode::BAD_GATEWAY,
                codes::UPSTREAM_UNREACHABLE,
                msg,
            ),
        };
        let body = ErrorResponse::new(code, message);
        (status, Json(body)).into_response()
    }
}

impl From<ParseError> for ApiError {
    fn from(e: ParseError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

/// The automatic status policy for backend failures.
///
/// `NotFound` maps to 404 only on the unpin operations, which match it
/// explicitly before this conversion runs; everywhere else it folds into
/// the domain-error path.
impl From<RpcError> for ApiError {
    fn from(e: RpcError) -> Self {
        match e {
            RpcError::Timeout => ApiError::Timeout,
            RpcError::Transport(msg) => ApiError::Unreachable(msg),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: ApiError) -> StatusCode {
        e.into_response().status()
    }

    #[test]
    fn statuses() {
        assert_eq!(status_of(ApiError::BadRequest("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ApiError::InvalidBody("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ApiError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ApiError::Upstream("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(ApiError::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            status_of(ApiError::Unreachable("x".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn automatic_policy_folds_not_found_into_500() {
        // 404 is reserved for the unpin handlers, which match NotFound
        // themselves; the blanket conversion must not map it.
        assert_eq!(
            status_of(ApiError::from(RpcError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ApiError::from(RpcError::Domain("boom".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(ApiError::from(RpcError::Timeout)), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            status_of(ApiError::from(RpcError::Transport("down".into()))),
            StatusCode::BAD_GATEWAY
        );
    }
}
