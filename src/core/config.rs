//! Assistant configuration with documented defaults
//!
//! Every external location the executor touches (pages it opens, the
//! knowledge base it loads) is collected here so deployments can change
//! them without touching the dispatch rules.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::{NovaError, Result};

/// Configuration for one assistant process
///
/// Loaded once at startup and handed to `Session::bootstrap`. There is no
/// global copy; whoever needs a value receives it explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    // === KNOWLEDGE ===
    /// Path to the TOML knowledge base
    ///
    /// A missing or unparsable file is fatal at startup.
    pub knowledge_base: PathBuf,

    // === PAGES ===
    /// Page opened for "open browser"
    pub home_url: String,

    /// Page opened for weather requests
    pub weather_url: String,

    /// Search endpoint; the percent-encoded term is appended verbatim
    pub search_url: String,

    // === POWER ===
    /// Grace period (seconds) passed to the Windows shutdown command
    ///
    /// Unix-like hosts power off immediately via `shutdown -h now` / `reboot`.
    pub power_delay_secs: u32,

    // === EXECUTION ===
    /// Log side effects instead of performing them
    pub dry_run: bool,

    // === LOGGING ===
    /// `tracing-subscriber` filter directive (overridden by `RUST_LOG`)
    pub log_filter: String,

    /// Where the full-screen front-end writes logs; `None` discards them
    pub log_file: Option<PathBuf>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            knowledge_base: PathBuf::from("data/brain.toml"),

            home_url: "https://www.google.com".into(),
            weather_url: "https://weather.com".into(),
            search_url: "https://www.google.com/search?q=".into(),

            power_delay_secs: 5,

            dry_run: false,

            log_filter: "nova=info".into(),
            log_file: None,
        }
    }
}

impl AssistantConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a config file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NovaError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.knowledge_base.as_os_str().is_empty() {
            return Err(NovaError::Config("knowledge_base must not be empty".into()));
        }

        for (key, url) in [
            ("home_url", &self.home_url),
            ("weather_url", &self.weather_url),
            ("search_url", &self.search_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(NovaError::Config(format!(
                    "{} must be an http(s) URL, got {:?}",
                    key, url
                )));
            }
        }

        Ok(())
    }
}
