use std::sync::Arc;

use crate::id::AssetId;
use serde::{Deserialize, Serialize};

/// Broad asset type, determined from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
    Unknown,
}

impl AssetKind {
    /// Maps lowercase file extension to asset kind.
    pub fn from_format(format: &str) -> Self {
        match format {
            "gif" | "jpg" | "jpeg" | "tif" | "tiff" | "png" | "bmp" => AssetKind::Image,
            "mp4" | "mov" | "avi" | "m4v" | "mpg" | "wmv" => AssetKind::Video,
            _ => AssetKind::Unknown,
        }
    }

    /// Returns media kind that decoding surfaces understand.
    /// `None` for assets that carry no media attributes.
    #[inline]
    pub fn media_kind(self) -> Option<MediaKind> {
        match self {
            AssetKind::Image => Some(MediaKind::Image),
            AssetKind::Video => Some(MediaKind::Video),
            AssetKind::Unknown => None,
        }
    }
}

/// Kind of decoding surface used to probe an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Static image. Ready once decoded, no duration.
    Image,

    /// Time-based media. Ready once metadata is loaded.
    Video,
}

/// Immutable description of an asset source.
///
/// `path` may be a local path or a URL.
/// It is not validated here, the transports that consume it decide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub id: AssetId,
    pub name: Arc<str>,
    pub format: Arc<str>,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub path: Arc<str>,
}

impl AssetDescriptor {
    /// Creates descriptor for asset at `path`, naming it after the last path segment.
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        Self::from_path_with_name(path, name)
    }

    /// Creates descriptor for asset at `path` with explicit file name.
    pub fn from_path_with_name(path: &str, name: &str) -> Self {
        let format = match name.rsplit_once('.') {
            None => String::new(),
            Some((_, extension)) => extension
                .split('?')
                .next()
                .unwrap_or_default()
                .to_lowercase(),
        };
        let kind = AssetKind::from_format(&format);

        AssetDescriptor {
            id: AssetId::from_path(path),
            name: name.into(),
            format: format.into(),
            kind,
            path: path.into(),
        }
    }

    #[inline]
    pub fn media_kind(&self) -> Option<MediaKind> {
        self.kind.media_kind()
    }
}

/// Intrinsic attributes of a media asset.
///
/// Width and height are always positive.
/// `duration` is in seconds and only present for time-based media.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaAttributes {
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration: Option<f64>,
}
