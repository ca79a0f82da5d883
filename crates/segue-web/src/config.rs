use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use confyg::{env, Confygery};
use segue_core::{Exclusion, RecommendOptions};
use serde::{Deserialize, Serialize};

use crate::error::{WebError, WebResult};

/// Configuration for segue.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SEGUE_* prefix)
/// 3. Config file (~/.config/segue/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the song catalog artifact (JSON, optionally `.gz`).
    ///
    /// Can be set via:
    /// - CLI: --catalog /path/to/catalog.json
    /// - ENV: SEGUE_CATALOG_PATH
    /// - Default: ~/.local/share/segue/catalog.json
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Path to the similarity matrix artifact (JSON, optionally `.gz`).
    ///
    /// Can be set via:
    /// - CLI: --similarity /path/to/similarity.json
    /// - ENV: SEGUE_SIMILARITY_PATH
    /// - Default: ~/.local/share/segue/similarity.json
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Interface the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Minimum fuzzy-match ratio for a query to resolve to a song.
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,

    /// Number of recommendations per lookup.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// How the matched song is removed from its own recommendations.
    #[serde(default)]
    pub exclusion: Exclusion,

    /// One of trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_coloured")]
    pub log_coloured: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            similarity_path: default_similarity_path(),
            host: default_host(),
            port: default_port(),
            cutoff: default_cutoff(),
            limit: default_limit(),
            exclusion: Exclusion::default(),
            log_level: default_log_level(),
            log_coloured: default_log_coloured(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/segue/config.toml
    /// Reads environment variables with SEGUE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration using the given file (if it exists) and the
    /// environment.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("segue");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Check values that serde cannot constrain.
    pub fn validate(&self) -> WebResult<()> {
        self.recommend_options().validate()?;
        if self.port == 0 {
            return Err(WebError::Config("port must be non-zero".to_string()));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(WebError::Config(format!(
                "unknown log_level {:?}; expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn recommend_options(&self) -> RecommendOptions {
        RecommendOptions::default()
            .with_cutoff(self.cutoff)
            .with_limit(self.limit)
            .with_exclusion(self.exclusion)
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The effective configuration rendered as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("segue")
}

fn default_catalog_path() -> PathBuf {
    data_dir().join("catalog.json")
}

fn default_similarity_path() -> PathBuf {
    data_dir().join("similarity.json")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    5000
}

const fn default_cutoff() -> f64 {
    0.7
}

const fn default_limit() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_log_coloured() -> bool {
    true
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/segue/config.toml
/// - macOS: ~/Library/Application Support/segue/config.toml
/// - Windows: %APPDATA%\segue\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("segue")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Segue Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SEGUE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Song catalog: a JSON array of {"title": ..., "artist": ...} records.
# A path ending in .gz is decompressed on load.
#
# Can also be set via:
# - CLI: segue --catalog /path/to/catalog.json serve
# - Environment: SEGUE_CATALOG_PATH=/path/to/catalog.json
#catalog_path = "/path/to/catalog.json"

# Similarity matrix: a JSON array of rows, one per catalog song.
#similarity_path = "/path/to/similarity.json"

# HTTP listener
#host = "127.0.0.1"
#port = 5000

# Minimum fuzzy-match ratio (0.0 - 1.0) for a query to resolve to a song
#cutoff = 0.7

# Recommendations per lookup
#limit = 5

# How the matched song is kept out of its own recommendations:
# "positional" drops the top-ranked entry, "self_index" drops the song's
# own column wherever it ranks
#exclusion = "positional"

# Logging
#log_level = "info"
#log_coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

/// Create a default config file at `config_path` if it doesn't exist.
pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
