//! Configuration management for docfetch.
//!
//! Configuration is stored in TOML and layered as follows, later layers
//! winning:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. The config file: `$DOCFETCH_CONFIG` (which must exist), or
//!    `config.toml` in the platform config directory (optional)
//! 3. Environment variables: `DOCFETCH_CACHE_DIR`, `DOCFETCH_LOCALE`,
//!    `DOCFETCH_BASE_URL`
//!
//! ## Example Configuration File
//!
//! ```toml
//! locale = "en-us"
//! cache_root = "/home/user/.cache/docfetch"
//! base_url = "https://docs.microsoft.com"
//! timeout_secs = 30
//! ```
//!
//! ```rust,no_run
//! use docfetch_core::{Config, PageFetcher};
//!
//! let config = Config::load()?;
//! let fetcher = PageFetcher::new(config.fetcher_config())?;
//! println!("Caching under {}", fetcher.cache_root().display());
//! # Ok::<(), docfetch_core::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fetcher::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, FetcherConfig};
use crate::{Error, Locale, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DOCFETCH_CONFIG";
/// Environment variable overriding [`Config::cache_root`].
pub const CACHE_DIR_ENV: &str = "DOCFETCH_CACHE_DIR";
/// Environment variable overriding [`Config::locale`].
pub const LOCALE_ENV: &str = "DOCFETCH_LOCALE";
/// Environment variable overriding [`Config::base_url`].
pub const BASE_URL_ENV: &str = "DOCFETCH_BASE_URL";

/// Global configuration for docfetch.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale pages are requested and cached in.
    pub locale: Locale,

    /// Root directory of the page cache.
    ///
    /// Default locations:
    /// - Linux: `~/.cache/docfetch`
    /// - macOS: `~/Library/Caches/dev.docfetch.docfetch`
    /// - Windows: `%LOCALAPPDATA%\docfetch\docfetch\cache`
    pub cache_root: PathBuf,

    /// Scheme and host of the documentation site.
    pub base_url: String,

    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            cache_root: default_cache_root(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

fn default_cache_root() -> PathBuf {
    directories::ProjectDirs::from("dev", "docfetch", "docfetch").map_or_else(
        || {
            directories::BaseDirs::new().map_or_else(
                || PathBuf::from(".docfetch/cache"),
                |base| base.home_dir().join(".docfetch").join("cache"),
            )
        },
        |dirs| dirs.cache_dir().to_path_buf(),
    )
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// See [`Config::load_with`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, the file
    /// named by `DOCFETCH_CONFIG` does not exist, or a config file exists but
    /// cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration, reading environment variables through `lookup`.
    ///
    /// The file comes from `DOCFETCH_CONFIG` when that is set, and must then
    /// exist. Otherwise the default location is used and a missing file means
    /// defaults. Environment overrides are applied last.
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = lookup(CONFIG_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let mut config = match explicit {
            Some(path) => Self::load_required(&path)?,
            None => Self::load_from(&Self::default_path()?)?,
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Load configuration from `path`, which must exist.
    pub fn load_required(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file '{}' does not exist",
                path.display()
            )));
        }
        Self::load_from(path)
    }

    /// Load configuration from `path` without applying environment overrides.
    ///
    /// Returns [`Config::default`] if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }
        let content = self.to_toml()?;
        fs::write(path, content).map_err(|e| Error::Config(format!("Failed to write config: {e}")))
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))
    }

    /// Apply overrides read through `lookup`, keyed by environment variable
    /// name. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(dir) = get(CACHE_DIR_ENV) {
            self.cache_root = PathBuf::from(dir);
        }
        if let Some(locale) = get(LOCALE_ENV) {
            self.locale = Locale::new(&locale)?;
        }
        if let Some(url) = get(BASE_URL_ENV) {
            self.base_url = url;
        }
        Ok(())
    }

    /// Settings for [`PageFetcher::new`](crate::PageFetcher::new).
    #[must_use]
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig::new(self.locale.clone(), self.cache_root.clone())
            .with_base_url(self.base_url.clone())
            .with_user_agent(self.user_agent.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// `config.toml` in the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "docfetch", "docfetch")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
