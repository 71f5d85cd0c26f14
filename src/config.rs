use crate::constants::{
    ALLOWED_DOWNLOAD_PREFIX, BOLETINES_INDEX_URL, DEFAULT_FILENAME, INPI_BASE_URL,
};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Resolved configuration with all values filled in (no Options).
///
/// Every field has a default pointing at the live INPI portal, so an empty TOML
/// file (or no file at all) yields a working configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    // Sources
    /// Page listing all published bulletins
    pub index_url: String,
    /// Origin prepended to relative bulletin links
    pub base_url: String,
    /// Literal prefix a download URL must start with
    pub allowed_prefix: String,
    /// Filename used when a URL has no final path segment
    pub default_filename: String,

    // HTTP client
    /// Timeout applied to every outbound request, in seconds
    pub request_timeout_secs: u64,
    pub user_agent: String,

    // Server
    /// Address the HTTP API listens on
    pub bind_addr: String,

    // CLI
    /// Directory where `download` stores bulletins
    pub download_dir: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            index_url: BOLETINES_INDEX_URL.to_string(),
            base_url: INPI_BASE_URL.to_string(),
            allowed_prefix: ALLOWED_DOWNLOAD_PREFIX.to_string(),
            default_filename: DEFAULT_FILENAME.to_string(),
            request_timeout_secs: 30,
            user_agent: concat!("boletin-marcas/", env!("CARGO_PKG_VERSION")).to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
            download_dir: PathBuf::from("boletines"),
        }
    }
}

impl ResolvedConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults. Unknown keys are rejected so that
    /// typos are not silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read and `InvalidInput` if the TOML is
    /// malformed or any value fails [`ResolvedConfig::validate`].
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let config: ResolvedConfig = toml::from_str(contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> AppResult<()> {
        if self.request_timeout_secs == 0 {
            return Err(AppError::InvalidInput(
                "Request timeout must be greater than 0".into(),
            ));
        }
        for (name, value) in [("index_url", &self.index_url), ("base_url", &self.base_url)] {
            Url::parse(value)
                .map_err(|e| AppError::InvalidInput(format!("{name} is not a valid URL: {e}")))?;
        }
        if self.allowed_prefix.is_empty() {
            return Err(AppError::InvalidInput(
                "allowed_prefix must not be empty".into(),
            ));
        }
        if self.default_filename.is_empty() {
            return Err(AppError::InvalidInput(
                "default_filename must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Loads the configuration from `path` when given, otherwise returns the defaults.
pub fn load_config(path: Option<&Path>) -> AppResult<ResolvedConfig> {
    match path {
        Some(path) => ResolvedConfig::from_toml_file(path),
        None => Ok(ResolvedConfig::default()),
    }
}
