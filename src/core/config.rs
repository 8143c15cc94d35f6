//! Configuration management for the MCP server.
//!
//! Every location the server touches is an explicit value here, resolved
//! once at startup from the environment (and an optional `.env` file).

use super::transport::TransportConfig;
use crate::domains::templates::{DEFAULT_EXTENSION, DescriptionTable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Template catalog configuration.
    pub templates: TemplatesConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Security and path validation configuration.
    pub security: SecurityConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the template catalog and records output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding the template files.
    pub template_dir: PathBuf,

    /// Directory where agents store generated records. Created at startup.
    pub record_dir: PathBuf,

    /// Extension of template files, without the leading dot.
    pub extension: String,

    /// Descriptions attached to templates in listings.
    #[serde(default)]
    pub descriptions: DescriptionTable,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for security and path validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Whether template files may resolve (through symlinks) to locations
    /// outside the template directory.
    pub allow_symlinks: bool,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("templates"),
            record_dir: PathBuf::from("records"),
            extension: DEFAULT_EXTENSION.to_string(),
            descriptions: DescriptionTable::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "devrecord-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            templates: TemplatesConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_TEMPLATE_DIR`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = parse_flag(&timestamps).unwrap_or(true);
        }

        if let Ok(dir) = std::env::var("MCP_TEMPLATE_DIR") {
            config.templates.template_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("MCP_RECORD_DIR") {
            config.templates.record_dir = PathBuf::from(dir);
        }

        if let Ok(extension) = std::env::var("MCP_TEMPLATE_EXTENSION") {
            let extension = extension.trim().trim_start_matches('.');
            if !extension.is_empty() {
                config.templates.extension = extension.to_string();
            }
        }

        if let Ok(allow_symlinks) = std::env::var("MCP_ALLOW_SYMLINKS") {
            config.security.allow_symlinks = parse_flag(&allow_symlinks).unwrap_or(false);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}

/// Parse a boolean-ish environment value.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MCP_SERVER_NAME",
        "MCP_TEMPLATE_DIR",
        "MCP_RECORD_DIR",
        "MCP_TEMPLATE_EXTENSION",
        "MCP_ALLOW_SYMLINKS",
        "MCP_LOG_TIMESTAMPS",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "devrecord-server");
        assert_eq!(config.templates.template_dir, PathBuf::from("templates"));
        assert_eq!(config.templates.record_dir, PathBuf::from("records"));
        assert_eq!(config.templates.extension, "md");
        assert!(!config.security.allow_symlinks);
        assert_eq!(config.templates.descriptions, DescriptionTable::default());
    }

    #[test]
    fn test_directories_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_TEMPLATE_DIR", "/srv/devrecord/templates");
            std::env::set_var("MCP_RECORD_DIR", "/srv/devrecord/records");
        }

        let config = Config::from_env();
        assert_eq!(
            config.templates.template_dir,
            PathBuf::from("/srv/devrecord/templates")
        );
        assert_eq!(
            config.templates.record_dir,
            PathBuf::from("/srv/devrecord/records")
        );
        clear_env();
    }

    #[test]
    fn test_extension_strips_leading_dot() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_TEMPLATE_EXTENSION", ".txt");
        }

        assert_eq!(Config::from_env().templates.extension, "txt");
        clear_env();
    }

    #[test]
    fn test_flags_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_ALLOW_SYMLINKS", "yes");
            std::env::set_var("MCP_LOG_TIMESTAMPS", "off");
        }

        let config = Config::from_env();
        assert!(config.security.allow_symlinks);
        assert!(!config.logging.with_timestamps);
        clear_env();
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
