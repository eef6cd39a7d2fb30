use std::{fmt, sync::Arc};

/// Reason a decoding surface failed to produce media attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeFailure {
    /// Asset kind is neither image nor video.
    UnknownKind,

    /// Surface reported an error while loading or decoding the source.
    Surface(String),

    /// Surface went away without signalling completion.
    Abandoned,

    /// Surface signalled readiness but reported unusable attributes.
    InvalidAttributes(String),
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeFailure::UnknownKind => f.write_str("asset kind cannot be determined"),
            DecodeFailure::Surface(message) => f.write_str(message),
            DecodeFailure::Abandoned => {
                f.write_str("decoding surface was dropped before signalling")
            }
            DecodeFailure::InvalidAttributes(message) => {
                write!(f, "invalid media attributes: {}", message)
            }
        }
    }
}

/// Error returned by [`AssetReader`] operations.
///
/// Each error is scoped to the call that produced it.
/// Nothing is retried and nothing is substituted with a default value.
///
/// [`AssetReader`]: crate::AssetReader
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Absent input was passed to a read operation.
    #[error("No file handle provided")]
    InvalidArgument,

    /// Local read failed after the handle was accepted.
    #[error("Failed to read file")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Decoding surface could not load the asset.
    #[error("Failed to decode media attributes of '{path}': {reason}")]
    MediaDecode {
        path: Arc<str>,
        reason: DecodeFailure,
    },

    /// Remote fetch completed with non-success status.
    #[error("Request failed with status {status} {status_text}")]
    Fetch { status: u16, status_text: String },

    /// Transport failed before any status was received.
    #[error("Request to '{url}' failed")]
    Network {
        url: Arc<str>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn media_decode(path: &str, reason: DecodeFailure) -> Self {
        Error::MediaDecode {
            path: path.into(),
            reason,
        }
    }

    /// Checks if this error is [`Error::InvalidArgument`].
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument)
    }

    /// Checks if this error is a fetch that ended with `404 Not Found`.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns HTTP status if the request got as far as receiving one.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns path of the asset that failed to decode.
    #[inline]
    pub fn decode_path(&self) -> Option<&str> {
        match self {
            Error::MediaDecode { path, .. } => Some(&**path),
            _ => None,
        }
    }
}

/// Formats error together with its chain of sources.
pub(crate) fn report(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(err) = source {
        message.push_str(": ");
        message.push_str(&err.to_string());
        source = err.source();
    }
    message
}
