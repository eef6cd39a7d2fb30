use std::{io::Cursor, sync::Arc};

use bytes::Bytes;
use image::{ImageError, ImageReader};
use parking_lot::Mutex;
use tokio::{runtime::Handle, task::JoinHandle};
use url::Url;

use crate::{
    error::{report, Error},
    http::{fetch_binary, AnyHttpClient, SharedClient},
};

use super::{DecodingSurface, Signal, SurfaceAttributes, NO_RUNTIME};

/// Image surface.
/// Ready once the image header is decoded and natural size is known.
pub(crate) struct ImageSurface {
    client: SharedClient,
    attributes: Arc<Mutex<SurfaceAttributes>>,
    task: Option<JoinHandle<()>>,
}

impl ImageSurface {
    pub(crate) fn new(client: SharedClient) -> Self {
        ImageSurface {
            client,
            attributes: Arc::default(),
            task: None,
        }
    }
}

impl DecodingSurface for ImageSurface {
    fn attach(&mut self, source: &str, signal: Signal) {
        let client = self.client.clone();
        let attributes = self.attributes.clone();
        let source = source.to_owned();

        let Ok(runtime) = Handle::try_current() else {
            signal.error(NO_RUNTIME);
            return;
        };

        self.task = Some(runtime.spawn(async move {
            match natural_size(&*client, &source).await {
                Ok((width, height)) => {
                    *attributes.lock() = SurfaceAttributes {
                        width,
                        height,
                        duration: None,
                    };
                    signal.ready();
                }
                Err(message) => signal.error(message),
            }
        }));
    }

    fn attributes(&self) -> SurfaceAttributes {
        *self.attributes.lock()
    }

    fn release(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn natural_size(client: &dyn AnyHttpClient, source: &str) -> Result<(u32, u32), String> {
    let bytes = load_source(client, source)
        .await
        .map_err(|err| report(&err))?;

    match tokio::task::spawn_blocking(move || decode_dimensions(&bytes)).await {
        Ok(Ok(size)) => Ok(size),
        Ok(Err(err)) => Err(report(&err)),
        Err(err) => Err(report(&err)),
    }
}

/// Loads raw bytes of the image source.
///
/// `http` and `https` URLs are fetched, `file` URLs and anything
/// that is not a URL are read from disk.
pub(crate) async fn load_source(client: &dyn AnyHttpClient, source: &str) -> Result<Bytes, Error> {
    let path = match Url::parse(source) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            return fetch_binary(client, source).await;
        }
        Ok(url) if url.scheme() == "file" => url.to_file_path().map_err(|()| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "Invalid file: URL")
        })?,
        _ => source.into(),
    };

    let data = tokio::fs::read(&path).await?;
    Ok(data.into())
}

fn decode_dimensions(bytes: &[u8]) -> Result<(u32, u32), ImageError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn header_dimensions() {
        assert_eq!(decode_dimensions(&png_bytes(4, 3)).unwrap(), (4, 3));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode_dimensions(b"definitely not an image").is_err());
    }
}
