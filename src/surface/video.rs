use std::{path::Path, process::Stdio, sync::Arc};

use parking_lot::Mutex;
use serde::Deserialize;
use tokio::{process::Command, runtime::Handle, task::JoinHandle};

use super::{DecodingSurface, Signal, SurfaceAttributes, NO_RUNTIME};

/// Video surface.
/// Ready once container metadata is read, frames are never decoded.
pub(crate) struct VideoSurface {
    ffprobe: Arc<Path>,
    attributes: Arc<Mutex<SurfaceAttributes>>,
    task: Option<JoinHandle<()>>,
}

impl VideoSurface {
    pub(crate) fn new(ffprobe: Arc<Path>) -> Self {
        VideoSurface {
            ffprobe,
            attributes: Arc::default(),
            task: None,
        }
    }
}

impl DecodingSurface for VideoSurface {
    fn attach(&mut self, source: &str, signal: Signal) {
        let ffprobe = self.ffprobe.clone();
        let attributes = self.attributes.clone();
        let source = source.to_owned();

        let Ok(runtime) = Handle::try_current() else {
            signal.error(NO_RUNTIME);
            return;
        };

        self.task = Some(runtime.spawn(async move {
            match probe(&ffprobe, &source).await {
                Ok(probed) => {
                    *attributes.lock() = probed;
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
        // Aborting drops the pending output future, which kills the child.
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn probe(ffprobe: &Path, source: &str) -> Result<SurfaceAttributes, String> {
    let output = Command::new(ffprobe)
        .args(["-v", "error"])
        .args(["-select_streams", "v:0"])
        .args(["-show_entries", "stream=width,height:format=duration"])
        .args(["-of", "json"])
        .arg(source)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|err| format!("Failed to run '{}': {}", ffprobe.display(), err))?;

    if !output.status.success() {
        return Err(format!(
            "'{}' failed with {}: {}",
            ffprobe.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim(),
        ));
    }

    parse_probe(&output.stdout)
}

#[derive(Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    #[serde(default)]
    format: Option<ProbeFormat>,
}

#[derive(Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

fn parse_probe(stdout: &[u8]) -> Result<SurfaceAttributes, String> {
    let output: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|err| format!("Unexpected ffprobe output: {}", err))?;

    let Some(stream) = output.streams.first() else {
        return Err("No video stream found".to_owned());
    };

    let duration = match output.format.and_then(|format| format.duration) {
        None => None,
        Some(duration) => Some(
            duration
                .trim()
                .parse::<f64>()
                .map_err(|err| format!("Invalid duration '{}': {}", duration, err))?,
        ),
    };

    Ok(SurfaceAttributes {
        width: stream.width.unwrap_or(0),
        height: stream.height.unwrap_or(0),
        duration,
    })
}
