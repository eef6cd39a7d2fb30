use std::{
    borrow::Cow,
    io::{Error, ErrorKind},
    path::PathBuf,
    sync::Arc,
};

use bytes::Bytes;
use tokio::io::AsyncReadExt;

/// Handle to local file content.
#[derive(Clone, Debug)]
pub enum FileHandle {
    /// Content already in memory, e.g. dropped or pasted by the user.
    Memory { name: Arc<str>, bytes: Bytes },

    /// File on disk.
    Path(PathBuf),
}

impl FileHandle {
    pub fn from_bytes(name: &str, bytes: impl Into<Bytes>) -> Self {
        FileHandle::Memory {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        FileHandle::Path(path.into())
    }

    /// File name for diagnostics.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            FileHandle::Memory { name, .. } => Cow::Borrowed(&**name),
            FileHandle::Path(path) => path.to_string_lossy(),
        }
    }

    /// Reads whole content of the file.
    pub(crate) async fn read(self) -> Result<Bytes, Error> {
        match self {
            FileHandle::Memory { bytes, .. } => Ok(bytes),
            FileHandle::Path(path) => {
                let mut file = tokio::fs::File::open(&path).await?;
                let len = file.metadata().await?.len();

                let Ok(len) = usize::try_from(len) else {
                    return Err(Error::new(ErrorKind::InvalidData, "File is too large"));
                };

                let mut data = Vec::with_capacity(len);
                file.read_to_end(&mut data).await?;
                Ok(data.into())
            }
        }
    }

    /// Reads whole content and decodes it as UTF-8.
    pub(crate) async fn read_text(self) -> Result<String, Error> {
        let bytes = self.read().await?;
        match std::str::from_utf8(&bytes) {
            Ok(text) => Ok(text.to_owned()),
            Err(err) => Err(Error::new(ErrorKind::InvalidData, err)),
        }
    }
}
