use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use board_render::{DEFAULT_BUFFER_SIZE, MIN_BUFFER_SIZE};

use crate::error::{ServerError, ServerResult};

/// Runtime settings for [`BoardServer`](crate::BoardServer).
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address. Port 0 picks an ephemeral port.
    pub bind_addr: SocketAddr,
    /// Size of the response flush buffer in bytes.
    pub buffer_size: usize,
    /// Largest accepted request head in bytes.
    pub max_request_size: usize,
    /// Time allowed for a client to send its request head.
    pub read_timeout_secs: u64,
    /// Connections served at once; further clients wait in the backlog.
    pub max_connections: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_request_size: 8 * 1024,
            read_timeout_secs: 10,
            max_connections: 256,
        }
    }
}

impl ServerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Replace the port of `bind_addr`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.bind_addr.set_port(port);
        self
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn validate(&self) -> ServerResult<()> {
        if self.buffer_size < MIN_BUFFER_SIZE {
            return Err(ServerError::Config(format!(
                "buffer_size must be at least {MIN_BUFFER_SIZE} bytes, got {}",
                self.buffer_size
            )));
        }
        if self.max_request_size == 0 {
            return Err(ServerError::Config("max_request_size must be positive".into()));
        }
        if self.read_timeout_secs == 0 {
            return Err(ServerError::Config("read_timeout_secs must be positive".into()));
        }
        if self.max_connections == 0 {
            return Err(ServerError::Config("max_connections must be positive".into()));
        }
        Ok(())
    }
}
