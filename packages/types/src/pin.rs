//! Pin records, pin categories, and path-style pin references.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::cid::Cid;
use crate::error::ParseError;
use crate::peer::PeerId;
use crate::query::parse_i32_option;

bitflags::bitflags! {
    /// Pin category bitmask.
    ///
    /// A single pin carries exactly one category bit; query filters OR
    /// several together. `BAD` is the sentinel for an unrecognized token:
    /// it never appears on a stored pin and invalidates any filter it
    /// shows up in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PinType: u32 {
        /// Unrecognized category sentinel.
        const BAD = 1;
        /// A regular content pin.
        const DATA = 1 << 1;
        /// Metadata describing a sharded DAG.
        const META = 1 << 2;
        /// The root node of a sharded DAG.
        const CLUSTER_DAG = 1 << 3;
        /// One shard of a sharded DAG.
        const SHARD = 1 << 4;
        /// Every real category; the "no restriction" filter.
        const ALL = Self::DATA.bits()
            | Self::META.bits()
            | Self::CLUSTER_DAG.bits()
            | Self::SHARD.bits();
    }
}

impl PinType {
    /// Look a single token up in the category table. Unknown tokens map
    /// to [`PinType::BAD`].
    pub fn from_token(token: &str) -> PinType {
        match token {
            "data" => PinType::DATA,
            "meta" => PinType::META,
            "clusterdag" => PinType::CLUSTER_DAG,
            "shard" => PinType::SHARD,
            "all" => PinType::ALL,
            _ => PinType::BAD,
        }
    }

    /// The token for a single category (or `"all"`/`"bad"`).
    pub fn as_token(self) -> &'static str {
        if self == PinType::DATA {
            "data"
        } else if self == PinType::META {
            "meta"
        } else if self == PinType::CLUSTER_DAG {
            "clusterdag"
        } else if self == PinType::SHARD {
            "shard"
        } else if self == PinType::ALL {
            "all"
        } else {
            "bad"
        }
    }

    /// Parse a comma-separated filter expression, e.g. `"data,meta"`.
    ///
    /// Tokens are ORed together; OR is associative and idempotent, so
    /// ordering and duplicates do not change the result. Any unrecognized
    /// token invalidates the whole filter. The empty string means "no
    /// restriction" and yields [`PinType::ALL`].
    pub fn from_filter(s: &str) -> Result<PinType, ParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(PinType::ALL);
        }
        let mut mask = PinType::empty();
        for token in s.split(',') {
            let token = token.trim();
            let t = PinType::from_token(token);
            if t == PinType::BAD {
                return Err(ParseError::InvalidFilter(token.to_string()));
            }
            mask |= t;
        }
        Ok(mask)
    }
}

impl Serialize for PinType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for PinType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let t = PinType::from_token(&s);
        if t == PinType::BAD {
            return Err(de::Error::custom(format!("unknown pin type: {s}")));
        }
        Ok(t)
    }
}

/// Per-pin options decoded from query parameters on pin operations.
///
/// | Query key | Field |
/// |-----------|-------|
/// | `name` | `name` |
/// | `replication` | both factors |
/// | `replication-min` | `replication_factor_min` |
/// | `replication-max` | `replication_factor_max` |
///
/// A replication factor of `0` means "use the cluster default"; `-1`
/// means "pin everywhere".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PinOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub replication_factor_min: i32,

    #[serde(default)]
    pub replication_factor_max: i32,
}

impl PinOptions {
    /// Decode pin options from raw query parameters.
    ///
    /// `replication` sets both factors; the `-min`/`-max` keys override
    /// it individually. Malformed integers are invalid-input errors.
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, ParseError> {
        let both = parse_i32_option(query, "replication")?;
        let min = parse_i32_option(query, "replication-min")?;
        let max = parse_i32_option(query, "replication-max")?;
        Ok(PinOptions {
            name: query.get("name").filter(|n| !n.is_empty()).cloned(),
            replication_factor_min: min.or(both).unwrap_or(0),
            replication_factor_max: max.or(both).unwrap_or(0),
        })
    }
}

/// A pin entry: a request that cluster nodes replicate the given content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pin {
    pub cid: Cid,

    #[serde(rename = "type")]
    pub pin_type: PinType,

    /// Peers this pin is allocated to. Empty means "everywhere".
    #[serde(default)]
    pub allocations: Vec<PeerId>,

    #[serde(default)]
    pub replication_factor_min: i32,

    #[serde(default)]
    pub replication_factor_max: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Pin {
    /// A data pin for `cid` carrying the given options.
    pub fn with_options(cid: Cid, opts: PinOptions) -> Self {
        Pin {
            cid,
            pin_type: PinType::DATA,
            allocations: Vec::new(),
            replication_factor_min: opts.replication_factor_min,
            replication_factor_max: opts.replication_factor_max,
            name: opts.name,
        }
    }
}

/// Namespace tag of a path-style pin reference.
///
/// The route table only matches these three tags, so a [`PinPath`] can
/// always be constructed from a matched route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinNamespace {
    Ipfs,
    Ipns,
    Ipld,
}

impl PinNamespace {
    pub fn as_str(self) -> &'static str {
        match self {
            PinNamespace::Ipfs => "ipfs",
            PinNamespace::Ipns => "ipns",
            PinNamespace::Ipld => "ipld",
        }
    }
}

impl FromStr for PinNamespace {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ipfs" => Ok(PinNamespace::Ipfs),
            "ipns" => Ok(PinNamespace::Ipns),
            "ipld" => Ok(PinNamespace::Ipld),
            _ => Err(ParseError::InvalidFilter(s.to_string())),
        }
    }
}

/// A path-style pin reference, e.g. `/ipfs/Qm…/dir/file`.
///
/// The backing service resolves the path to a content identifier before
/// pinning or unpinning it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PinPath {
    /// Canonical path string, always `/{namespace}/{path}`.
    pub path: String,

    #[serde(flatten)]
    pub opts: PinOptions,
}

impl PinPath {
    pub fn new(namespace: PinNamespace, path: &str, opts: PinOptions) -> Self {
        PinPath {
            path: format!("/{}/{}", namespace.as_str(), path),
            opts,
        }
    }
}

impl fmt::Display for PinPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_or_is_order_and_duplicate_invariant() {
        let a = PinType::from_filter("data,meta").unwrap();
        let b = PinType::from_filter("meta,data").unwrap();
        let c = PinType::from_filter("data,meta,data,meta").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, PinType::DATA | PinType::META);
    }

    #[test]
    fn empty_filter_means_all() {
        assert_eq!(PinType::from_filter("").unwrap(), PinType::ALL);
        assert_eq!(PinType::from_filter("  ").unwrap(), PinType::ALL);
    }

    #[test]
    fn unknown_token_invalidates_the_whole_filter() {
        assert!(PinType::from_filter("bogus").is_err());
        assert!(PinType::from_filter("data,bogus").is_err());
        assert!(PinType::from_filter("bad").is_err());
        assert!(PinType::from_filter("data,,meta").is_err());
    }

    #[test]
    fn all_token_composes() {
        assert_eq!(PinType::from_filter("all").unwrap(), PinType::ALL);
        assert_eq!(PinType::from_filter("data,all").unwrap(), PinType::ALL);
    }

    #[test]
    fn type_serializes_as_token() {
        let json = serde_json::to_string(&PinType::CLUSTER_DAG).unwrap();
        assert_eq!(json, "\"clusterdag\"");
        let back: PinType = serde_json::from_str("\"shard\"").unwrap();
        assert_eq!(back, PinType::SHARD);
        assert!(serde_json::from_str::<PinType>("\"bogus\"").is_err());
    }

    #[test]
    fn options_from_query() {
        let mut q = HashMap::new();
        q.insert("name".to_string(), "backups".to_string());
        q.insert("replication".to_string(), "3".to_string());
        q.insert("replication-max".to_string(), "5".to_string());
        let opts = PinOptions::from_query(&q).unwrap();
        assert_eq!(opts.name.as_deref(), Some("backups"));
        assert_eq!(opts.replication_factor_min, 3);
        assert_eq!(opts.replication_factor_max, 5);
    }

    #[test]
    fn options_reject_malformed_integers() {
        let mut q = HashMap::new();
        q.insert("replication-min".to_string(), "three".to_string());
        assert!(PinOptions::from_query(&q).is_err());
    }

    #[test]
    fn pin_path_is_canonical() {
        let p = PinPath::new(
            PinNamespace::Ipfs,
            "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG/readme",
            PinOptions::default(),
        );
        assert_eq!(
            p.to_string(),
            "/ipfs/QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG/readme"
        );
    }

    #[test]
    fn pin_roundtrip() {
        let pin = Pin {
            cid: "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
                .parse()
                .unwrap(),
            pin_type: PinType::DATA,
            allocations: vec![],
            replication_factor_min: -1,
            replication_factor_max: -1,
            name: Some("readme".into()),
        };
        let json = serde_json::to_string(&pin).unwrap();
        assert!(json.contains("\"type\":\"data\""));
        let back: Pin = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pin);
    }
}
