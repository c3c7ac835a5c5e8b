//! Multipart add handler — `POST /add`.

use std::collections::HashMap;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Query, State},
    response::{IntoResponse, Response},
};
use pinmesh_types::AddParams;

use crate::error::ApiError;

use super::AppState;

/// `POST /add` — stream a multipart body to the uploader collaborator.
///
/// Query parameters are validated first; a request with bad parameters is
/// rejected before any of the body is consumed. A body that is not
/// well-formed multipart yields the standard JSON error shape rather than
/// the extractor's plain-text rejection. On success the uploader owns the
/// response (and trailer) for this route.
pub async fn add(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    body: Result<Multipart, MultipartRejection>,
) -> Response {
    let params = match AddParams::from_query(&query) {
        Ok(params) => params,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            return ApiError::InvalidBody(format!("error reading request: {}", rejection.body_text()))
                .into_response()
        }
    };

    state.uploader.add(params, body).await
}
