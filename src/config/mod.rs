//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `RUBRIC_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::cache::CacheConfig;
use crate::constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_KEYWORD_WEIGHT, DEFAULT_LENGTH_WEIGHT, DEFAULT_SEMANTIC_WEIGHT,
};
use crate::embedding::{EncoderConfig, EncoderMode};
use crate::scoring::SignalWeights;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `RUBRIC_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `5000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding the embedding cache snapshot. Default: `./.cache`.
    pub cache_dir: PathBuf,

    /// JSON rubric file; the built-in rubric is used when unset.
    pub rubric_path: Option<PathBuf>,

    /// Embedding backend. Default: `model`.
    pub encoder_mode: EncoderMode,

    /// Sentence-transformer model directory (required in model mode).
    pub model_path: Option<PathBuf>,

    /// Vector length of the offline encoder. Default: `384`.
    pub embedding_dim: usize,

    pub semantic_weight: f64,
    pub keyword_weight: f64,
    pub length_weight: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            cache_dir: PathBuf::from("./.cache"),
            rubric_path: None,
            encoder_mode: EncoderMode::Model,
            model_path: None,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            semantic_weight: DEFAULT_SEMANTIC_WEIGHT,
            keyword_weight: DEFAULT_KEYWORD_WEIGHT,
            length_weight: DEFAULT_LENGTH_WEIGHT,
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "RUBRIC_PORT";
    pub const ENV_BIND_ADDR: &'static str = "RUBRIC_BIND_ADDR";
    pub const ENV_CACHE_DIR: &'static str = "RUBRIC_CACHE_DIR";
    pub const ENV_RUBRIC_PATH: &'static str = "RUBRIC_RUBRIC_PATH";
    pub const ENV_ENCODER: &'static str = "RUBRIC_ENCODER";
    pub const ENV_MODEL_PATH: &'static str = "RUBRIC_MODEL_PATH";
    pub const ENV_EMBEDDING_DIM: &'static str = "RUBRIC_EMBEDDING_DIM";
    pub const ENV_SEMANTIC_WEIGHT: &'static str = "RUBRIC_SEMANTIC_WEIGHT";
    pub const ENV_KEYWORD_WEIGHT: &'static str = "RUBRIC_KEYWORD_WEIGHT";
    pub const ENV_LENGTH_WEIGHT: &'static str = "RUBRIC_LENGTH_WEIGHT";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            port: Self::parse_port_from_env(defaults.port)?,
            bind_addr: Self::parse_bind_addr_from_env(defaults.bind_addr)?,
            cache_dir: Self::parse_path_from_env(Self::ENV_CACHE_DIR, defaults.cache_dir),
            rubric_path: Self::parse_optional_path_from_env(Self::ENV_RUBRIC_PATH),
            encoder_mode: Self::parse_encoder_mode_from_env(defaults.encoder_mode)?,
            model_path: Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH),
            embedding_dim: Self::parse_number_from_env(
                Self::ENV_EMBEDDING_DIM,
                defaults.embedding_dim,
            )?,
            semantic_weight: Self::parse_number_from_env(
                Self::ENV_SEMANTIC_WEIGHT,
                defaults.semantic_weight,
            )?,
            keyword_weight: Self::parse_number_from_env(
                Self::ENV_KEYWORD_WEIGHT,
                defaults.keyword_weight,
            )?,
            length_weight: Self::parse_number_from_env(
                Self::ENV_LENGTH_WEIGHT,
                defaults.length_weight,
            )?,
        })
    }

    /// Validates paths and weights (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_dir.exists() && !self.cache_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.cache_dir.clone(),
            });
        }

        if let Some(ref path) = self.rubric_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if self.encoder_mode == EncoderMode::Model {
            let Some(ref path) = self.model_path else {
                return Err(ConfigError::MissingEnvVar {
                    name: Self::ENV_MODEL_PATH,
                });
            };
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        self.signal_weights().map(|_| ())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Default signal weights, renormalised if needed.
    pub fn signal_weights(&self) -> Result<SignalWeights, ConfigError> {
        SignalWeights::new(self.semantic_weight, self.keyword_weight, self.length_weight).map_err(
            |e| ConfigError::InvalidWeights {
                reason: e.to_string(),
            },
        )
    }

    pub fn encoder_config(&self) -> EncoderConfig {
        let config = match (self.encoder_mode, &self.model_path) {
            (EncoderMode::Model, Some(path)) => EncoderConfig::new(path.clone()),
            (EncoderMode::Model, None) => EncoderConfig::default(),
            (EncoderMode::Offline, _) => EncoderConfig::offline(),
        };
        config.with_embedding_dim(self.embedding_dim)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::in_dir(&self.cache_dir)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_encoder_mode_from_env(default: EncoderMode) -> Result<EncoderMode, ConfigError> {
        match env::var(Self::ENV_ENCODER) {
            Ok(value) if !value.trim().is_empty() => value
                .parse()
                .map_err(|_| ConfigError::InvalidEncoderMode { value }),
            _ => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(value) if !value.trim().is_empty() => {
                value
                    .trim()
                    .parse()
                    .map_err(|e: T::Err| ConfigError::InvalidNumber {
                        name: var_name,
                        value: value.clone(),
                        reason: e.to_string(),
                    })
            }
            _ => Ok(default),
        }
    }
}
