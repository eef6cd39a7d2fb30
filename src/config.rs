use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use eyre::WrapErr;

use crate::{http::ReqwestClient, reader::AssetReader, surface::DEFAULT_FFPROBE};

/// Prefix of environment variables read by [`ReaderConfig::from_env`].
pub const ENV_PREFIX: &str = "ASSET_PROBE_";

fn default_ffprobe() -> PathBuf {
    PathBuf::from(DEFAULT_FFPROBE)
}

/// Configuration of the default [`AssetReader`] stack.
///
/// Nothing here imposes a timeout unless set explicitly.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReaderConfig {
    /// ffprobe executable used to probe videos.
    #[serde(default = "default_ffprobe")]
    pub ffprobe: PathBuf,

    /// Timeout for HTTP requests, in seconds.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timeout_secs: Option<u64>,

    /// User agent sent with HTTP requests.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_agent: Option<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            ffprobe: default_ffprobe(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl ReaderConfig {
    pub fn write(&self, path: &Path) -> eyre::Result<()> {
        let config = toml::to_string_pretty(self).wrap_err("Failed to serialize config")?;
        std::fs::write(path, &config)
            .wrap_err_with(|| format!("Failed to write config file '{}'", path.display()))?;
        Ok(())
    }

    pub fn read(path: &Path) -> eyre::Result<Self> {
        let err_ctx = || format!("Failed to read config file '{}'", path.display());

        let config = std::fs::read(path).wrap_err_with(err_ctx)?;
        let config: ReaderConfig = toml::from_slice(&config).wrap_err_with(err_ctx)?;
        Ok(config)
    }

    /// Reads `ASSET_PROBE_FFPROBE`, `ASSET_PROBE_TIMEOUT_SECS`
    /// and `ASSET_PROBE_USER_AGENT`.
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_env_prefixed(ENV_PREFIX)
    }

    pub fn from_env_prefixed(prefix: &str) -> eyre::Result<Self> {
        envy::prefixed(prefix)
            .from_env()
            .wrap_err_with(|| format!("Failed to read config from '{}*' variables", prefix))
    }

    #[inline]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl AssetReader {
    /// Builds reader with reqwest client and native surfaces configured by `config`.
    #[tracing::instrument(skip_all)]
    pub fn from_config(config: &ReaderConfig) -> eyre::Result<Self> {
        let client = ReqwestClient::with_options(config.timeout(), config.user_agent.as_deref())
            .wrap_err("Failed to build HTTP client")?;

        tracing::debug!("Using ffprobe at '{}'", config.ffprobe.display());

        Ok(AssetReader::builder()
            .with_client(client)
            .with_ffprobe(&config.ffprobe)
            .build())
    }
}
