use std::ops::Deref;

use bytes::Bytes;

/// Raw bytes of a fetched asset.
#[derive(Clone, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct AssetBlob(Bytes);

impl AssetBlob {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl From<Bytes> for AssetBlob {
    #[inline]
    fn from(bytes: Bytes) -> Self {
        AssetBlob(bytes)
    }
}

impl Deref for AssetBlob {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for AssetBlob {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
