use super::error::MetainfoError;
use crate::constants::INFO_HASH_LEN;
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// A v1 info hash: the SHA1 digest of a torrent's bencoded info dictionary.
///
/// Displayed as 40 lowercase hex characters.
///
/// # Examples
///
/// ```
/// use btmeta::metainfo::InfoHash;
///
/// let hash = InfoHash::from_hex("C12FE1C06BBA254A9DC9F519B335AA7C1367A88A").unwrap();
/// assert_eq!(hash.to_string(), "c12fe1c06bba254a9dc9f519b335aa7c1367a88a");
/// assert_eq!(hash.as_bytes().len(), 20);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoHash([u8; INFO_HASH_LEN]);

impl InfoHash {
    pub fn new(bytes: [u8; INFO_HASH_LEN]) -> Self {
        InfoHash(bytes)
    }

    /// Hashes the bencoded bytes of an info dictionary.
    pub fn from_info_bytes(raw_info: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(raw_info);
        InfoHash(hasher.finalize().into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetainfoError> {
        let arr: [u8; INFO_HASH_LEN] = bytes.try_into().map_err(|_| {
            MetainfoError::InvalidHash(format!(
                "expected {} bytes, got {}",
                INFO_HASH_LEN,
                bytes.len()
            ))
        })?;
        Ok(InfoHash(arr))
    }

    /// Parses a hex string in either case.
    ///
    /// # Errors
    ///
    /// Fails with [`MetainfoError::InvalidHash`] if the string is not hex,
    /// has odd length, or does not decode to 20 bytes.
    pub fn from_hex(s: &str) -> Result<Self, MetainfoError> {
        let bytes = hex::decode(s).map_err(|e| MetainfoError::InvalidHash(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; INFO_HASH_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for InfoHash {
    type Err = MetainfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for InfoHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
