use super::{ConfigError, VettedConfig};

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Read `server.host` and `server.port`, defaulting whichever is absent.
    ///
    /// A present but malformed value is an error rather than a silent default.
    pub fn from_config(config: &VettedConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: config.get_optional("server.host")?.unwrap_or(defaults.host),
            port: config.get_optional("server.port")?.unwrap_or(defaults.port),
        })
    }

    /// `host:port`, ready for [`App::serve`](crate::App::serve).
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
