//! Parse errors and the standard JSON error response body.

use serde::{Deserialize, Serialize};

/// An invalid path, query, or body parameter.
///
/// Raised by the codec functions in this crate before any remote call is
/// made; the gateway maps every variant to HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The content identifier is not a valid CIDv0/CIDv1 encoding.
    #[error("invalid content identifier: {0}")]
    InvalidCid(String),

    /// The peer identifier is not valid base58btc.
    #[error("invalid peer identifier: {0}")]
    InvalidPeerId(String),

    /// A type or status filter contained an unrecognized token.
    #[error("invalid filter value: {0}")]
    InvalidFilter(String),

    /// A boolean query flag held something other than `true`/`false`.
    #[error("invalid value for flag {name}: {value}")]
    InvalidFlag { name: String, value: String },

    /// A numeric query option failed to parse.
    #[error("invalid value for option {name}: {value}")]
    InvalidOption { name: String, value: String },
}

/// The JSON body returned for all error responses.
///
/// ```json
/// { "error": "invalid filter value: bogus", "code": "invalid_parameter" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Human-readable description of the problem.
    pub error: String,

    /// Machine-readable error code.
    ///
    /// Defined values:
    ///
    /// | `code` | HTTP status |
    /// |--------|------------|
    /// | `invalid_json` | 400 |
    /// | `invalid_parameter` | 400 |
    /// | `not_found` | 404 |
    /// | `upstream_error` | 500 |
    /// | `upstream_unreachable` | 502 |
    /// | `upstream_timeout` | 504 |
    pub code: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a static code and message.
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            error: error.into(),
        }
    }
}

/// Well-known error codes.
pub mod codes {
    pub const INVALID_JSON: &str = "invalid_json";
    pub const INVALID_PARAMETER: &str = "invalid_parameter";
    pub const NOT_FOUND: &str = "not_found";
    pub const UPSTREAM_ERROR: &str = "upstream_error";
    pub const UPSTREAM_UNREACHABLE: &str = "upstream_unreachable";
    pub const UPSTREAM_TIMEOUT: &str = "upstream_timeout";
}
