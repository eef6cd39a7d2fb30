use std::{
    future::Future,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    asset::{AssetDescriptor, MediaAttributes, MediaKind},
    blob::AssetBlob,
    error::{DecodeFailure, Error},
    file::FileHandle,
    http::{fetch_binary, HttpClient, ReqwestClient, SharedClient},
    surface::{
        NativeSurfaces, ScopedSurface, Signal, SurfaceAttributes, SurfaceFactory, DEFAULT_FFPROBE,
    },
};

/// Builder for [`AssetReader`].
/// Allows replacing the HTTP transport and decoding surfaces.
pub struct AssetReaderBuilder {
    client: Option<SharedClient>,
    surfaces: Option<Arc<dyn SurfaceFactory>>,
    ffprobe: PathBuf,
}

impl Default for AssetReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetReaderBuilder {
    /// Returns builder that would produce reader with default reqwest client
    /// and native decoding surfaces.
    pub fn new() -> Self {
        AssetReaderBuilder {
            client: None,
            surfaces: None,
            ffprobe: PathBuf::from(DEFAULT_FFPROBE),
        }
    }

    /// Sets HTTP client used for blob fetches and remote images.
    pub fn set_client(&mut self, client: impl HttpClient) -> &mut Self {
        self.client = Some(Arc::new(client));
        self
    }

    /// Sets HTTP client used for blob fetches and remote images.
    pub fn with_client(mut self, client: impl HttpClient) -> Self {
        self.set_client(client);
        self
    }

    /// Sets factory for decoding surfaces.
    pub fn set_surfaces(&mut self, surfaces: impl SurfaceFactory) -> &mut Self {
        self.surfaces = Some(Arc::new(surfaces));
        self
    }

    /// Sets factory for decoding surfaces.
    pub fn with_surfaces(mut self, surfaces: impl SurfaceFactory) -> Self {
        self.set_surfaces(surfaces);
        self
    }

    /// Sets ffprobe executable for native video surfaces.
    ///
    /// Ignored when custom surfaces are set.
    pub fn with_ffprobe(mut self, ffprobe: impl Into<PathBuf>) -> Self {
        self.ffprobe = ffprobe.into();
        self
    }

    /// Builds and returns new [`AssetReader`] instance.
    pub fn build(self) -> AssetReader {
        let client: SharedClient = match self.client {
            Some(client) => client,
            None => Arc::new(ReqwestClient::new()),
        };

        let surfaces: Arc<dyn SurfaceFactory> = match self.surfaces {
            Some(surfaces) => surfaces,
            None => {
                let ffprobe: Arc<Path> = self.ffprobe.into();
                Arc::new(NativeSurfaces::with_shared(client.clone(), ffprobe))
            }
        };

        AssetReader { client, surfaces }
    }
}

/// Reads text, media attributes and binary content of assets.
///
/// Every operation is independent and allocates its own resources.
/// No state is shared or cached between calls.
#[derive(Clone)]
pub struct AssetReader {
    client: SharedClient,
    surfaces: Arc<dyn SurfaceFactory>,
}

impl Default for AssetReader {
    fn default() -> Self {
        AssetReader::builder().build()
    }
}

impl AssetReader {
    /// Returns [`AssetReaderBuilder`] instance.
    pub fn builder() -> AssetReaderBuilder {
        AssetReaderBuilder::new()
    }

    /// Reads whole content of the file as UTF-8 text.
    ///
    /// Absent handle is rejected right away with [`Error::InvalidArgument`],
    /// before any future is created.
    /// Read failures and invalid UTF-8 resolve to [`Error::Io`].
    pub fn read_as_text(
        &self,
        file: Option<FileHandle>,
    ) -> Result<impl Future<Output = Result<String, Error>> + Send + 'static, Error> {
        let Some(file) = file else {
            return Err(Error::InvalidArgument);
        };

        tracing::debug!("Reading '{}' as text", file.name());
        Ok(async move { file.read_text().await.map_err(Error::from) })
    }

    /// Probes width, height and, for videos, duration of the asset.
    ///
    /// A fresh decoding surface is created for the call and released
    /// on every exit path, including this future being dropped.
    #[tracing::instrument(skip(self, asset), fields(path = %asset.path))]
    pub async fn read_asset_attributes(
        &self,
        asset: &AssetDescriptor,
    ) -> Result<MediaAttributes, Error> {
        let Some(kind) = asset.media_kind() else {
            tracing::warn!("Cannot probe '{}' of unknown kind", asset.path);
            return Err(Error::media_decode(&asset.path, DecodeFailure::UnknownKind));
        };

        let mut surface = ScopedSurface::new(&*self.surfaces, kind);

        let (signal, completion) = Signal::new();
        surface.attach(&asset.path, signal);

        if let Err(reason) = completion.wait().await {
            tracing::warn!("Surface failed for '{}'. {}", asset.path, reason);
            return Err(Error::media_decode(&asset.path, reason));
        }

        harvest(kind, surface.attributes())
            .map_err(|reason| Error::media_decode(&asset.path, reason))
    }

    /// Fetches binary content of the asset with a single GET request.
    ///
    /// Only status `200` resolves, any other status is [`Error::Fetch`].
    #[tracing::instrument(skip(self, asset), fields(path = %asset.path))]
    pub async fn get_asset_blob(&self, asset: &AssetDescriptor) -> Result<AssetBlob, Error> {
        let bytes = fetch_binary(&*self.client, &asset.path).await?;
        Ok(AssetBlob::from(bytes))
    }
}

fn harvest(
    kind: MediaKind,
    attributes: SurfaceAttributes,
) -> Result<MediaAttributes, DecodeFailure> {
    let SurfaceAttributes {
        width,
        height,
        duration,
    } = attributes;

    if width == 0 || height == 0 {
        return Err(DecodeFailure::InvalidAttributes(format!(
            "natural size is {}x{}",
            width, height
        )));
    }

    match kind {
        MediaKind::Image => Ok(MediaAttributes {
            width,
            height,
            duration: None,
        }),
        MediaKind::Video => match duration {
            Some(duration) if duration.is_finite() && duration >= 0.0 => Ok(MediaAttributes {
                width,
                height,
                duration: Some(duration),
            }),
            Some(duration) => Err(DecodeFailure::InvalidAttributes(format!(
                "duration is {}",
                duration
            ))),
            None => Err(DecodeFailure::InvalidAttributes(
                "duration is unknown".to_owned(),
            )),
        },
    }
}
