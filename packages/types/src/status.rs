//! Tracker statuses and the per-node / cluster-wide pin status shapes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::cid::Cid;
use crate::error::ParseError;
use crate::peer::PeerId;

bitflags::bitflags! {
    /// Pinning lifecycle state of a pin on one node.
    ///
    /// A [`PinInfo`] carries exactly one bit; status filters OR several
    /// together. The empty mask means "undefined", which callers treat as
    /// "no filter". This is an independent bitmask domain from
    /// [`PinType`](crate::pin::PinType); the two are never mixed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TrackerStatus: u32 {
        /// The cluster peer could not be reached.
        const CLUSTER_ERROR = 1;
        /// Pinning failed on the node.
        const PIN_ERROR = 1 << 1;
        /// Unpinning failed on the node.
        const UNPIN_ERROR = 1 << 2;
        const PINNED = 1 << 3;
        const PINNING = 1 << 4;
        const UNPINNING = 1 << 5;
        const UNPINNED = 1 << 6;
        /// Pinned on another allocation; tracked remotely here.
        const REMOTE = 1 << 7;
        const PIN_QUEUED = 1 << 8;
        const UNPIN_QUEUED = 1 << 9;
    }
}

impl TrackerStatus {
    /// Look a single token up in the state table. Composite tokens
    /// (`"queued"`, `"error"`) expand to the union of their members.
    /// Returns `None` for unknown tokens.
    pub fn from_token(token: &str) -> Option<TrackerStatus> {
        Some(match token {
            "cluster_error" => TrackerStatus::CLUSTER_ERROR,
            "pin_error" => TrackerStatus::PIN_ERROR,
            "unpin_error" => TrackerStatus::UNPIN_ERROR,
            "error" => {
                TrackerStatus::CLUSTER_ERROR | TrackerStatus::PIN_ERROR | TrackerStatus::UNPIN_ERROR
            }
            "pinned" => TrackerStatus::PINNED,
            "pinning" => TrackerStatus::PINNING,
            "unpinning" => TrackerStatus::UNPINNING,
            "unpinned" => TrackerStatus::UNPINNED,
            "remote" => TrackerStatus::REMOTE,
            "pin_queued" => TrackerStatus::PIN_QUEUED,
            "unpin_queued" => TrackerStatus::UNPIN_QUEUED,
            "queued" => TrackerStatus::PIN_QUEUED | TrackerStatus::UNPIN_QUEUED,
            _ => return None,
        })
    }

    /// The token for a single state; the empty mask is `"undefined"`.
    pub fn as_token(self) -> &'static str {
        if self == TrackerStatus::CLUSTER_ERROR {
            "cluster_error"
        } else if self == TrackerStatus::PIN_ERROR {
            "pin_error"
        } else if self == TrackerStatus::UNPIN_ERROR {
            "unpin_error"
        } else if self == TrackerStatus::PINNED {
            "pinned"
        } else if self == TrackerStatus::PINNING {
            "pinning"
        } else if self == TrackerStatus::UNPINNING {
            "unpinning"
        } else if self == TrackerStatus::UNPINNED {
            "unpinned"
        } else if self == TrackerStatus::REMOTE {
            "remote"
        } else if self == TrackerStatus::PIN_QUEUED {
            "pin_queued"
        } else if self == TrackerStatus::UNPIN_QUEUED {
            "unpin_queued"
        } else {
            "undefined"
        }
    }

    /// Parse a comma-separated status filter, e.g. `"queued,pinning"`.
    ///
    /// The empty string yields the empty ("undefined") mask, which means
    /// "unfiltered" and is passed through to the backing service as
    /// given. A non-empty string with any unknown token is an
    /// invalid-input error.
    pub fn from_filter(s: &str) -> Result<TrackerStatus, ParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(TrackerStatus::empty());
        }
        let mut mask = TrackerStatus::empty();
        for token in s.split(',') {
            let token = token.trim();
            mask |= TrackerStatus::from_token(token)
                .ok_or_else(|| ParseError::InvalidFilter(token.to_string()))?;
        }
        Ok(mask)
    }
}

impl Serialize for TrackerStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for TrackerStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == "undefined" {
            return Ok(TrackerStatus::empty());
        }
        TrackerStatus::from_token(&s)
            .ok_or_else(|| de::Error::custom(format!("unknown tracker status: {s}")))
    }
}

/// Pin status as reported by a single node (the *local* shape).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PinInfo {
    pub cid: Cid,

    /// The node this status belongs to.
    pub peer: PeerId,

    pub status: TrackerStatus,

    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl PinInfo {
    /// Lift this per-node record into the cluster-wide shape: a one-entry
    /// peer map keyed by the reporting node.
    pub fn into_global(self) -> GlobalPinInfo {
        GlobalPinInfo {
            cid: self.cid.clone(),
            peer_map: BTreeMap::from([(self.peer.to_string(), self)]),
        }
    }
}

/// Pin status across the cluster (the *global* shape): one entry per
/// peer. This is the only status shape clients ever see; node-scoped
/// results are lifted into it via [`PinInfo::into_global`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalPinInfo {
    pub cid: Cid,

    pub peer_map: BTreeMap<String, PinInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid() -> Cid {
        "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
            .parse()
            .unwrap()
    }

    fn peer() -> PeerId {
        "12D3KooWQYV9dGMFoRzNStwpXztXaBUjtPqi6aU76ZgUriHhKust"
            .parse()
            .unwrap()
    }

    #[test]
    fn empty_filter_is_undefined_not_an_error() {
        assert_eq!(TrackerStatus::from_filter("").unwrap(), TrackerStatus::empty());
    }

    #[test]
    fn unknown_token_is_an_error() {
        assert!(TrackerStatus::from_filter("bogus").is_err());
        assert!(TrackerStatus::from_filter("pinned,bogus").is_err());
    }

    #[test]
    fn composite_tokens_expand() {
        assert_eq!(
            TrackerStatus::from_filter("queued").unwrap(),
            TrackerStatus::PIN_QUEUED | TrackerStatus::UNPIN_QUEUED
        );
        assert_eq!(
            TrackerStatus::from_filter("error").unwrap(),
            TrackerStatus::CLUSTER_ERROR | TrackerStatus::PIN_ERROR | TrackerStatus::UNPIN_ERROR
        );
    }

    #[test]
    fn status_serializes_as_token() {
        assert_eq!(
            serde_json::to_string(&TrackerStatus::PINNED).unwrap(),
            "\"pinned\""
        );
        assert_eq!(
            serde_json::to_string(&TrackerStatus::empty()).unwrap(),
            "\"undefined\""
        );
        let back: TrackerStatus = serde_json::from_str("\"pin_queued\"").unwrap();
        assert_eq!(back, TrackerStatus::PIN_QUEUED);
    }

    #[test]
    fn into_global_keys_by_reporting_peer() {
        let info = PinInfo {
            cid: cid(),
            peer: peer(),
            status: TrackerStatus::PINNED,
            timestamp: Utc::now(),
            error: String::new(),
        };
        let global = info.clone().into_global();
        assert_eq!(global.cid, info.cid);
        assert_eq!(global.peer_map.len(), 1);
        assert_eq!(global.peer_map.get(peer().as_str()), Some(&info));
    }
}
