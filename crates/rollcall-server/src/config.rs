use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Store address used when none is configured.
pub const DEFAULT_REDIS_URL: &str = "redis://redis:6379/";

/// Runtime configuration of the rollcall server.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Overlay image blended into retrieved images. The bundled overlay is
    /// used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_path: Option<PathBuf>,
    /// HTML served at `/`. The bundled page is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
    pub store: StoreBackend,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            overlay_path: None,
            welcome_path: None,
            max_upload_bytes: 16 * 1024 * 1024,
            store: StoreBackend::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }
}

/// Where contributor records and image blobs live.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreBackend {
    Redis { url: String },
    /// Process-local store; contents are lost on exit.
    Memory,
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::Redis {
            url: DEFAULT_REDIS_URL.to_string(),
        }
    }
}
