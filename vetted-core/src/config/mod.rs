mod loader;
mod server;
mod value;

use std::collections::HashMap;
use std::path::Path;

pub use server::ServerConfig;
pub use value::{ConfigValue, FromConfigValue};

/// Environment variable that selects the active profile.
pub const PROFILE_ENV: &str = "VETTED_PROFILE";

#[derive(Debug)]
pub enum ConfigError {
    NotFound(String),
    /// The key exists but its value does not convert to `expected`.
    TypeMismatch { key: String, expected: &'static str },
    /// A config file could not be read or parsed.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "missing configuration key `{key}`"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "configuration key `{key}` is not a valid {expected}")
            }
            ConfigError::Load(msg) => write!(f, "could not load configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration from YAML files, `.env` files and environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. `application.yaml`
/// 2. `application-{profile}.yaml`
/// 3. `.env` and `.env.{profile}` (loaded into the process environment, never
///    overwriting variables that are already set)
/// 4. Environment variables (`SERVER_PORT` overrides `server.port`)
///
/// The profile is `VETTED_PROFILE` when set, otherwise the argument.
#[derive(Debug, Clone)]
pub struct VettedConfig {
    values: HashMap<String, ConfigValue>,
    profile: String,
}

impl VettedConfig {
    /// Load configuration from the current working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."), profile)
    }

    /// Load configuration, looking for YAML and `.env` files in `dir`.
    pub fn load_from(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());
        let mut values = HashMap::new();

        loader::load_yaml_file(&dir.join("application.yaml"), &mut values)?;
        loader::load_yaml_file(&dir.join(format!("application-{profile}.yaml")), &mut values)?;

        let _ = dotenvy::from_path(dir.join(".env"));
        let _ = dotenvy::from_path(dir.join(format!(".env.{profile}")));

        for (name, value) in std::env::vars() {
            values.insert(loader::env_key(&name), ConfigValue::String(value));
        }

        tracing::debug!(%profile, keys = values.len(), "configuration loaded");
        Ok(Self { values, profile })
    }

    /// Create a config from a YAML string, without files or environment.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(Self {
            values,
            profile: profile.to_string(),
        })
    }

    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
            profile: "test".to_string(),
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Typed lookup of a dotted key such as `server.port`.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        self.get_optional(key)?
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))
    }

    /// A missing key is `Ok(None)`; a present key must convert.
    pub fn get_optional<V: FromConfigValue>(&self, key: &str) -> Result<Option<V>, ConfigError> {
        self.values
            .get(key)
            .map(|value| V::from_config_value(value, key))
            .transpose()
    }

    /// `default` when the key is missing or does not convert.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }
}
