//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Image loader configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    /// Largest raw image accepted, in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Fully decode images instead of only sniffing the magic bytes
    #[serde(default = "default_strict_decode")]
    pub strict_decode: bool,

    /// Buffered load events per lagging subscriber
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024 // 10 MiB
}

fn default_strict_decode() -> bool {
    false
}

fn default_event_capacity() -> usize {
    64
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            strict_decode: default_strict_decode(),
            event_capacity: default_event_capacity(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("tierlab").join("config.toml")),
            Some(PathBuf::from("/etc/tierlab/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Loader overrides
        if let Ok(max_bytes) = std::env::var("TIERLAB_MAX_IMAGE_BYTES") {
            if let Ok(n) = max_bytes.parse() {
                self.loader.max_bytes = n;
            }
        }
        if let Ok(strict) = std::env::var("TIERLAB_STRICT_DECODE") {
            if let Ok(b) = strict.parse() {
                self.loader.strict_decode = b;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("TIERLAB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TIERLAB_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Tierlab Configuration
#
# Environment variables override these settings:
# - TIERLAB_MAX_IMAGE_BYTES
# - TIERLAB_STRICT_DECODE
# - TIERLAB_LOG_LEVEL
# - TIERLAB_LOG_FORMAT

[loader]
# Largest raw image accepted (bytes)
max_bytes = 10485760

# Fully decode images on load instead of only sniffing the magic bytes
strict_decode = false

# Buffered load events per lagging subscriber
event_capacity = 64

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/tierlab/tierlab.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.loader.max_bytes, 10 * 1024 * 1024);
        assert!(!config.loader.strict_decode);
        assert_eq!(config.loader.event_capacity, 64);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [loader]
            max_bytes = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.loader.max_bytes, 1024);
        assert!(!config.loader.strict_decode);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.loader.max_bytes, default_max_bytes());
        assert_eq!(config.loader.event_capacity, default_event_capacity());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[loader]\nstrict_decode = true\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.loader.strict_decode);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Config::load(Path::new("/nonexistent/tierlab.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
