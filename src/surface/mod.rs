//! Transient off-screen decoding surfaces.
//!
//! A surface is created per probe, given a source and a [`Signal`],
//! and fires the signal exactly once: ready or error.
//! Attributes are read back after readiness and the surface is released.

mod raster;
mod video;

use std::{
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::oneshot;

use crate::{
    asset::MediaKind,
    error::DecodeFailure,
    http::{HttpClient, SharedClient},
};

use self::{raster::ImageSurface, video::VideoSurface};

/// Default name of the ffprobe executable, resolved through `PATH`.
pub const DEFAULT_FFPROBE: &str = "ffprobe";

pub(crate) const NO_RUNTIME: &str = "Native surfaces require a Tokio runtime";

/// Attributes reported by a surface.
///
/// Zero dimensions mean the surface has nothing to report,
/// the same way an unloaded media element reports zero natural size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceAttributes {
    pub width: u32,
    pub height: u32,
    /// Duration in seconds, for time-based media.
    pub duration: Option<f64>,
}

/// Single-use completion signal handed to a surface on attach.
///
/// Dropping it without firing is reported as [`DecodeFailure::Abandoned`].
#[derive(Debug)]
pub struct Signal {
    sender: oneshot::Sender<Result<(), String>>,
}

impl Signal {
    pub(crate) fn new() -> (Signal, Completion) {
        let (sender, receiver) = oneshot::channel();
        (Signal { sender }, Completion { receiver })
    }

    /// Reports that attributes are available.
    pub fn ready(self) {
        let _ = self.sender.send(Ok(()));
    }

    /// Reports that the source could not be loaded or decoded.
    pub fn error(self, message: impl Into<String>) {
        let _ = self.sender.send(Err(message.into()));
    }
}

pub(crate) struct Completion {
    receiver: oneshot::Receiver<Result<(), String>>,
}

impl Completion {
    pub(crate) async fn wait(self) -> Result<(), DecodeFailure> {
        match self.receiver.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(message)) => Err(DecodeFailure::Surface(message)),
            Err(_) => Err(DecodeFailure::Abandoned),
        }
    }
}

/// Off-screen media decoder.
pub trait DecodingSurface: Send {
    /// Sets the source and starts loading it.
    /// `signal` must be fired once loading finishes one way or another.
    fn attach(&mut self, source: &str, signal: Signal);

    /// Attributes known so far.
    fn attributes(&self) -> SurfaceAttributes;

    /// Frees whatever the surface holds. Called exactly once.
    fn release(&mut self) {}
}

/// Constructs decoding surfaces.
pub trait SurfaceFactory: Send + Sync + 'static {
    fn create(&self, kind: MediaKind) -> Box<dyn DecodingSurface>;
}

// Releases the surface on scope exit.
pub(crate) struct ScopedSurface {
    kind: MediaKind,
    surface: Box<dyn DecodingSurface>,
}

impl ScopedSurface {
    pub(crate) fn new(factory: &dyn SurfaceFactory, kind: MediaKind) -> Self {
        tracing::debug!("Creating {:?} surface", kind);
        ScopedSurface {
            kind,
            surface: factory.create(kind),
        }
    }
}

impl Deref for ScopedSurface {
    type Target = dyn DecodingSurface;

    fn deref(&self) -> &(dyn DecodingSurface + 'static) {
        &*self.surface
    }
}

impl DerefMut for ScopedSurface {
    fn deref_mut(&mut self) -> &mut (dyn DecodingSurface + 'static) {
        &mut *self.surface
    }
}

impl Drop for ScopedSurface {
    fn drop(&mut self) {
        tracing::debug!("Releasing {:?} surface", self.kind);
        self.surface.release();
    }
}

/// Surfaces backed by native decoders.
///
/// Images are decoded with the `image` crate, only as far as the header.
/// Videos are probed with `ffprobe` which reads container metadata
/// without decoding frames.
///
/// Surfaces spawn their work on attach on the current Tokio runtime.
/// Without one they fail with an error signal.
#[derive(Clone)]
pub struct NativeSurfaces {
    client: SharedClient,
    ffprobe: Arc<Path>,
}

impl NativeSurfaces {
    /// Creates native surfaces that fetch remote images with `client`.
    pub fn new(client: impl HttpClient) -> Self {
        Self::with_shared(Arc::new(client), Path::new(DEFAULT_FFPROBE).into())
    }

    pub(crate) fn with_shared(client: SharedClient, ffprobe: Arc<Path>) -> Self {
        NativeSurfaces { client, ffprobe }
    }

    /// Sets path to the ffprobe executable.
    pub fn with_ffprobe(mut self, ffprobe: impl Into<PathBuf>) -> Self {
        self.ffprobe = ffprobe.into().into();
        self
    }

    pub fn ffprobe(&self) -> &Path {
        &self.ffprobe
    }
}

impl SurfaceFactory for NativeSurfaces {
    fn create(&self, kind: MediaKind) -> Box<dyn DecodingSurface> {
        match kind {
            MediaKind::Image => Box::new(ImageSurface::new(self.client.clone())),
            MediaKind::Video => Box::new(VideoSurface::new(self.ffprobe.clone())),
        }
    }
}
