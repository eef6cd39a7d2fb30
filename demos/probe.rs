//! Probes assets given on the command line.
//!
//! ```text
//! RUST_LOG=asset_probe=debug cargo run --example probe -- \
//!     photo.jpg https://server.com/video.mp4 notes.txt
//! ```
//!
//! Images and videos are probed for attributes, remote assets are also downloaded,
//! anything else that is local is read as text.

use asset_probe::{AssetDescriptor, AssetKind, AssetReader, FileHandle, ReaderConfig};
use tracing_subscriber::EnvFilter;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ReaderConfig::from_env()?;
    let reader = AssetReader::from_config(&config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        for path in std::env::args().skip(1) {
            let asset = AssetDescriptor::from_path(&path);
            let remote = path.starts_with("http://") || path.starts_with("https://");

            match asset.kind {
                AssetKind::Image | AssetKind::Video => {
                    match reader.read_asset_attributes(&asset).await {
                        Ok(attributes) => {
                            println!("{} ({}): {:?}", asset.name, asset.id, attributes)
                        }
                        Err(err) => tracing::error!("{:#}", eyre::Report::new(err)),
                    }
                }
                AssetKind::Unknown if !remote => {
                    let text = reader.read_as_text(Some(FileHandle::from_path(&path)))?;
                    match text.await {
                        Ok(text) => println!("{}: {} chars", asset.name, text.chars().count()),
                        Err(err) => tracing::error!("{:#}", eyre::Report::new(err)),
                    }
                }
                AssetKind::Unknown => {}
            }

            if remote {
                match reader.get_asset_blob(&asset).await {
                    Ok(blob) => println!("{}: {} bytes", asset.name, blob.len()),
                    Err(err) => tracing::error!("{:#}", eyre::Report::new(err)),
                }
            }
        }

        Ok::<_, eyre::Report>(())
    })
}
