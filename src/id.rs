use std::{borrow::Cow, fmt, num::NonZeroU64, str::FromStr};

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Stable asset id derived from the asset path.
///
/// Formatted, parsed and serialized as 16 lowercase hex digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId(NonZeroU64);

/// Error returned when parsing [`AssetId`] from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseAssetIdError {
    #[error("AssetId must be hex number")]
    NotHex,

    #[error("AssetId cannot be zero")]
    ZeroId,
}

impl AssetId {
    /// Takes first 8 bytes of SHA-256 digest of the path.
    /// Zero prefix is mapped to `1`.
    pub fn from_path(path: &str) -> Self {
        let digest = Sha256::digest(path.as_bytes());

        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);

        AssetId(NonZeroU64::new(u64::from_be_bytes(prefix)).unwrap_or(NonZeroU64::MIN))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0.get())
    }
}

impl FromStr for AssetId {
    type Err = ParseAssetIdError;

    fn from_str(s: &str) -> Result<Self, ParseAssetIdError> {
        let value = u64::from_str_radix(s, 16).map_err(|_| ParseAssetIdError::NotHex)?;
        NonZeroU64::new(value)
            .map(AssetId)
            .ok_or(ParseAssetIdError::ZeroId)
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = Cow::<str>::deserialize(deserializer)?;
        hex.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_same_id() {
        let a = AssetId::from_path("https://server.com/image.jpg");
        let b = AssetId::from_path("https://server.com/image.jpg");
        let c = AssetId::from_path("https://server.com/video.mp4");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_parses_back() {
        let id = AssetId::from_path("C:\\assets\\frame.png");
        let text = id.to_string();
        assert_eq!(text.len(), 16);
        assert_eq!(text.parse::<AssetId>(), Ok(id));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert_eq!(
            "0000000000000000".parse::<AssetId>(),
            Err(ParseAssetIdError::ZeroId)
        );
        assert_eq!("not-hex".parse::<AssetId>(), Err(ParseAssetIdError::NotHex));
    }

    #[test]
    fn serializes_as_hex_string() {
        let id: AssetId = "00000000000000ab".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000000000ab\"");

        let back: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
