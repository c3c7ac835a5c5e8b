//! Content identifiers in canonical string form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// An opaque, self-describing reference to immutable content.
///
/// Stored in its canonical textual form. Two encodings are accepted:
///
/// - **CIDv0**: `Qm…`, base58btc, decoding to a 34-byte sha2-256 multihash
///   (`0x12 0x20` prefix).
/// - **CIDv1**: `b…`, lowercase base32 (RFC 4648 alphabet, no padding),
///   decoding to `<version=1> <codec> <multihash>` with a digest whose
///   length matches its multihash header.
///
/// Anything else is an invalid-input error, resolved before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cid(String);

impl Cid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("Qm") {
            let bytes = bs58::decode(s)
                .into_vec()
                .map_err(|_| ParseError::InvalidCid(s.to_string()))?;
            // sha2-256 multihash: code 0x12, length 0x20, 32 digest bytes.
            if bytes.len() != 34 || bytes[0] != 0x12 || bytes[1] != 0x20 {
                return Err(ParseError::InvalidCid(s.to_string()));
            }
            return Ok(Cid(s.to_string()));
        }
        if let Some(rest) = s.strip_prefix('b') {
            let lowercase = !rest.is_empty()
                && rest
                    .bytes()
                    .all(|c| c.is_ascii_lowercase() || (b'2'..=b'7').contains(&c));
            if !lowercase {
                return Err(ParseError::InvalidCid(s.to_string()));
            }
            let bytes = data_encoding::BASE32_NOPAD
                .decode(rest.to_ascii_uppercase().as_bytes())
                .map_err(|_| ParseError::InvalidCid(s.to_string()))?;
            if is_cid_v1(&bytes) {
                return Ok(Cid(s.to_string()));
            }
        }
        Err(ParseError::InvalidCid(s.to_string()))
    }
}

/// Binary CIDv1 layout: `<version> <codec> <hash-code> <hash-len> <digest>`,
/// the first four fields being unsigned varints.
fn is_cid_v1(bytes: &[u8]) -> bool {
    let Some((version, rest)) = read_varint(bytes) else {
        return false;
    };
    if version != 1 {
        return false;
    }
    let Some((_codec, rest)) = read_varint(rest) else {
        return false;
    };
    let Some((_hash_code, rest)) = read_varint(rest) else {
        return false;
    };
    let Some((hash_len, digest)) = read_varint(rest) else {
        return false;
    };
    hash_len > 0 && digest.len() as u64 == hash_len
}

fn read_varint(buf: &[u8]) -> Option<(u64, &[u8])> {
    let mut value: u64 = 0;
    for (i, &byte) in buf.iter().enumerate() {
        if i == 9 {
            return None;
        }
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Some((value, &buf[i + 1..]));
        }
    }
    None
}

impl TryFrom<String> for Cid {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Cid> for String {
    fn from(cid: Cid) -> String {
        cid.0
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V0: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

    #[test]
    fn accepts_v0() {
        let cid: Cid = V0.parse().unwrap();
        assert_eq!(cid.as_str(), V0);
    }

    #[test]
    fn accepts_v1_base32() {
        let s = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
        assert!(s.parse::<Cid>().is_ok());
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<Cid>().is_err());
        assert!("notacid".parse::<Cid>().is_err());
        // Valid base58 but not a sha2-256 multihash.
        assert!("Qmfoo".parse::<Cid>().is_err());
        // 0/O/I/l are outside the base58btc alphabet.
        assert!("QmO0Il".parse::<Cid>().is_err());
        // Uppercase is not canonical base32.
        assert!("bAFYBEIG".parse::<Cid>().is_err());
    }

    #[test]
    fn rejects_base32_strings_that_are_not_cids() {
        // In-alphabet, but the payload is not a CID at all.
        assert!("bogus".parse::<Cid>().is_err());
        assert!("baaa".parse::<Cid>().is_err());
        // Digest truncated: the multihash header promises 32 bytes.
        let full = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
        assert!(full[..full.len() - 8].parse::<Cid>().is_err());
    }

    #[test]
    fn serde_uses_canonical_string() {
        let cid: Cid = V0.parse().unwrap();
        let json = serde_json::to_string(&cid).unwrap();
        assert_eq!(json, format!("\"{V0}\""));
        let back: Cid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cid);
        assert!(serde_json::from_str::<Cid>("\"bogus\"").is_err());
    }
}
