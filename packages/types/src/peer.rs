//! Peer identities and the peer-add request body.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// An opaque node identity, kept in its textual base58btc encoding.
///
/// The gateway never inspects the underlying multihash; it only verifies
/// that the encoding decodes, so that malformed identifiers are rejected
/// before any remote call.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeerId(String);

impl PeerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PeerId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| ParseError::InvalidPeerId(s.to_string()))?;
        if bytes.is_empty() {
            return Err(ParseError::InvalidPeerId(s.to_string()));
        }
        Ok(PeerId(s.to_string()))
    }
}

impl TryFrom<String> for PeerId {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PeerId> for String {
    fn from(p: PeerId) -> String {
        p.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request body for `POST /peers`.
///
/// ```json
/// { "peer_id": "12D3KooWQYV9dGMFoRzNStwpXztXaBUjtPqi6aU76ZgUriHhKust" }
/// ```
///
/// The `peer_id` field is kept as a raw string so that the handler can
/// distinguish "body did not decode" from "peer id did not decode" in its
/// 400 response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeerAddBody {
    pub peer_id: String,
}
