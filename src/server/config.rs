use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML from config file at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub log_dir: String,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    database_url: Option<String>,
    listen_addr: Option<String>,
    max_connections: Option<u32>,
    connect_timeout_secs: Option<u64>,
    log_dir: Option<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    8
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn parse_value<T: FromStr>(key: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            let parsed = v.trim().parse::<T>();
            parsed.map_err(|_| ConfigError::Invalid { key, value: v })
        })
        .transpose()
}

impl PartialServerConfig {
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: lookup("DATABASE_URL"),
            listen_addr: lookup("LISTEN_ADDR"),
            max_connections: parse_value("MAX_CONNECTIONS", lookup("MAX_CONNECTIONS"))?,
            connect_timeout_secs: parse_value(
                "CONNECT_TIMEOUT_SECS",
                lookup("CONNECT_TIMEOUT_SECS"),
            )?,
            log_dir: lookup("LOG_DIR"),
        })
    }
}

impl ServerConfig {
    /// Loads configuration from an optional TOML file, then the environment
    /// (including `.env`). Environment values override file values.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let file_config = match config_path {
            Some(path) => PartialServerConfig::from_file(Path::new(path))?,
            None => PartialServerConfig::default(),
        };
        let env_config = PartialServerConfig::from_lookup(|key| std::env::var(key).ok())?;

        Self::merge(env_config, file_config)
    }

    fn merge(overrides: PartialServerConfig, base: PartialServerConfig) -> Result<Self, ConfigError> {
        let listen_addr = overrides
            .listen_addr
            .or(base.listen_addr)
            .unwrap_or_else(default_listen_addr);

        Ok(ServerConfig {
            database_url: overrides
                .database_url
                .or(base.database_url)
                .ok_or(ConfigError::Missing("DATABASE_URL"))?,
            listen_addr: parse_value("LISTEN_ADDR", Some(listen_addr))?
                .ok_or(ConfigError::Missing("LISTEN_ADDR"))?,
            max_connections: overrides
                .max_connections
                .or(base.max_connections)
                .unwrap_or_else(default_max_connections),
            connect_timeout_secs: overrides
                .connect_timeout_secs
                .or(base.connect_timeout_secs)
                .unwrap_or_else(default_connect_timeout_secs),
            log_dir: overrides
                .log_dir
                .or(base.log_dir)
                .unwrap_or_else(default_log_dir),
        })
    }
}
