//! Query parameters for the multipart `POST /add` operation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::pin::PinOptions;
use crate::query::parse_bool_flag;

/// Default shard size when `shard=true` and no `shard-size` is given.
pub const DEFAULT_SHARD_SIZE: u64 = 100 * 1024 * 1024;

/// Decoded query parameters for `POST /add`.
///
/// Validated by the gateway before the multipart body is handed to the
/// uploader collaborator, so a request with bad parameters never starts
/// streaming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddParams {
    /// Pin name and replication factors for the resulting pin.
    #[serde(flatten)]
    pub opts: PinOptions,

    /// Whether to shard the content across peers instead of pinning the
    /// whole DAG on each allocation.
    pub shard: bool,

    /// Maximum shard size in bytes; only meaningful when `shard` is set.
    pub shard_size: u64,
}

impl AddParams {
    /// Decode add parameters from raw query parameters.
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, ParseError> {
        let opts = PinOptions::from_query(query)?;
        let shard = parse_bool_flag("shard", query.get("shard").map(String::as_str))?;
        let shard_size = match query.get("shard-size") {
            None => DEFAULT_SHARD_SIZE,
            Some(raw) => raw.parse::<u64>().map_err(|_| ParseError::InvalidOption {
                name: "shard-size".to_string(),
                value: raw.clone(),
            })?,
        };
        Ok(AddParams {
            opts,
            shard,
            shard_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_query_is_empty() {
        let params = AddParams::from_query(&HashMap::new()).unwrap();
        assert!(!params.shard);
        assert_eq!(params.shard_size, DEFAULT_SHARD_SIZE);
        assert_eq!(params.opts, PinOptions::default());
    }

    #[test]
    fn decodes_everything() {
        let mut q = HashMap::new();
        q.insert("name".to_string(), "photos".to_string());
        q.insert("shard".to_string(), "true".to_string());
        q.insert("shard-size".to_string(), "1048576".to_string());
        q.insert("replication-min".to_string(), "2".to_string());
        let params = AddParams::from_query(&q).unwrap();
        assert!(params.shard);
        assert_eq!(params.shard_size, 1_048_576);
        assert_eq!(params.opts.name.as_deref(), Some("photos"));
        assert_eq!(params.opts.replication_factor_min, 2);
    }

    #[test]
    fn rejects_malformed_values() {
        let mut q = HashMap::new();
        q.insert("shard".to_string(), "maybe".to_string());
        assert!(AddParams::from_query(&q).is_err());

        let mut q = HashMap::new();
        q.insert("shard-size".to_string(), "-1".to_string());
        assert!(AddParams::from_query(&q).is_err());
    }
}
