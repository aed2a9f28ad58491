//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a configuration from a TOML file, without validating it.
pub fn read_config_file(path: &Path, base: ServiceConfig) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    // Sections missing from the file fall back to `base`, not the global defaults.
    let mut value = toml::Value::try_from(&base).map_err(|e| {
        ConfigError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    let overlay: toml::Value = toml::from_str(&content).map_err(ConfigError::Parse)?;
    merge(&mut value, overlay);
    value.try_into().map_err(ConfigError::Parse)
}

fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Apply the `MYSQL_*`, `POD_NAME` and `BIND_ADDRESS` overrides.
///
/// `lookup` abstracts the environment so tests never touch process state.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(user) = lookup("MYSQL_USER") {
        config.database.user = user;
    }
    if let Some(password) = lookup("MYSQL_PASSWORD") {
        config.database.password = password;
    }
    if let Some(host) = lookup("MYSQL_HOST") {
        match host.rsplit_once(':').map(|(h, p)| (h, p.parse::<u16>())) {
            Some((h, Ok(port))) => {
                config.database.host = h.to_string();
                config.database.port = port;
            }
            _ => config.database.host = host,
        }
    }
    if let Some(database) = lookup("MYSQL_DATABASE") {
        config.database.database = database;
    }
    if let Some(pod_name) = lookup("POD_NAME") {
        config.pod_name = pod_name;
    }
    if let Some(bind) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = bind;
    }
    if config.pod_name.is_empty() {
        config.pod_name = "unknown".to_string();
    }
}

/// Build a validated configuration: service defaults, then the optional
/// TOML file, then environment overrides.
pub fn load_config(path: Option<&Path>, base: ServiceConfig) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path, base)?,
        None => base,
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
