// file: src/config.rs
// version: 2.1.0
// guid: 6ea31d79-e2bf-4304-a841-22bf1e595512

use crate::error::{OtpError, Result};
use crate::utils;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BINARY_PATH: &str = "/usr/local/bin/multiotp/multiotp.php";
pub const DEFAULT_QR_CODES_DIR: &str = "/etc/multiotp/qrcodes";

const PROJECT_CONFIG: &str = ".multiotp-agent.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub multiotp: MultiOtpConfig,
    pub logging: LoggingConfig,
    /// File the settings were read from; `None` means built-in defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiOtpConfig {
    /// Path to the multiOTP binary, or a bare name looked up on PATH
    pub binary_path: String,
    /// Directory that receives `<user>.png` QR codes
    pub qr_codes_dir: String,
    /// Issuer label written into token URLs; empty keeps multiOTP's own
    pub token_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for MultiOtpConfig {
    fn default() -> Self {
        Self {
            binary_path: DEFAULT_BINARY_PATH.to_string(),
            qr_codes_dir: DEFAULT_QR_CODES_DIR.to_string(),
            token_description: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from multiple sources
    ///
    /// An explicit file replaces the user and project files; environment
    /// overrides apply either way. Runs before logging is set up, so the
    /// chosen file is recorded in `source` instead of logged.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = explicit {
            config = Self::load_from_file(path)?;
        } else {
            if let Some(user_config) = Self::user_config_path() {
                if user_config.exists() {
                    config = Self::load_from_file(&user_config)?;
                }
            }

            let project_config = Path::new(PROJECT_CONFIG);
            if project_config.exists() {
                config = Self::load_from_file(project_config)?;
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Get the user configuration file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("multiotp-agent").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OtpError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml(&content).map_err(|e| {
            OtpError::config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides through the given lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bin) = lookup("MULTIOTP_BIN") {
            self.multiotp.binary_path = bin;
        }

        if let Some(dir) = lookup("MULTIOTP_QR_DIR") {
            self.multiotp.qr_codes_dir = dir;
        }

        if let Some(descr) = lookup("MULTIOTP_TOKEN_DESCR") {
            self.multiotp.token_description = descr;
        }

        if let Some(level) = lookup("MULTIOTP_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Binary path with `~` expanded and bare names resolved on PATH
    pub fn binary_path(&self) -> PathBuf {
        utils::resolve_binary_path(&self.multiotp.binary_path)
    }

    pub fn qr_codes_dir(&self) -> PathBuf {
        utils::expand_path(&self.multiotp.qr_codes_dir)
    }
}
