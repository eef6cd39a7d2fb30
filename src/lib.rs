//! Asset ingestion: text reads, media attribute probing and binary fetches.
//!
//! The entry point is [`AssetReader`]. It takes [`AssetDescriptor`]s,
//! values that identify an asset by local path or URL,
//! and offers three independent asynchronous operations:
//!
//! * [`AssetReader::read_as_text`] reads a [`FileHandle`] as UTF-8 text.
//! * [`AssetReader::read_asset_attributes`] probes pixel size and, for videos,
//!   duration, using a transient [`DecodingSurface`].
//! * [`AssetReader::get_asset_blob`] downloads raw bytes with a single GET.
//!
//! HTTP transport and decoding surfaces are injectable with
//! [`HttpClient`] and [`SurfaceFactory`].
//! Defaults are a `reqwest` client, `image` crate header decoding
//! and `ffprobe` for videos.
//!
//! # Example
//!
//! ```no_run
//! # async fn probe() -> Result<(), asset_probe::Error> {
//! use asset_probe::{AssetDescriptor, AssetReader};
//!
//! let reader = AssetReader::builder().build();
//! let asset = AssetDescriptor::from_path("https://server.com/video.mp4");
//!
//! let attributes = reader.read_asset_attributes(&asset).await?;
//! println!("{}x{} {:?}", attributes.width, attributes.height, attributes.duration);
//!
//! let blob = reader.get_asset_blob(&asset).await?;
//! println!("{} bytes", blob.len());
//! # Ok(())
//! # }
//! ```

mod asset;
mod blob;
mod config;
mod error;
mod file;
mod http;
mod id;
mod reader;
mod surface;

pub use self::{
    asset::{AssetDescriptor, AssetKind, MediaAttributes, MediaKind},
    blob::AssetBlob,
    config::{ReaderConfig, ENV_PREFIX},
    error::{DecodeFailure, Error},
    file::FileHandle,
    http::{HttpClient, HttpResponse, RequestConfig, ResponseType, ReqwestClient},
    id::{AssetId, ParseAssetIdError},
    reader::{AssetReader, AssetReaderBuilder},
    surface::{
        DecodingSurface, NativeSurfaces, Signal, SurfaceAttributes, SurfaceFactory,
        DEFAULT_FFPROBE,
    },
};
