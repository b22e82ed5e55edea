//! Configuration file parser for podgen.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde, though we log a warning when
//! the file contains potential typos.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the upstream RSS feed.
    pub feed_url: String,

    /// Where the catalog document is written.
    pub output_path: PathBuf,

    /// User-Agent header sent with the feed request.
    pub user_agent: String,

    /// Channel-level YouTube URL for the catalog meta block.
    /// Manually curated; an empty value preserves whatever the previous
    /// snapshot carries.
    pub youtube_channel_url: String,

    /// Author shown on episodes when the feed has no channel-level author.
    pub fallback_author: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: "https://www.spreaker.com/show/4179006/episodes/feed".to_string(),
            output_path: PathBuf::from("data/episodes.json"),
            user_agent: concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
                " (+episodes.json generator)"
            )
            .to_string(),
            youtube_channel_url: String::new(),
            fallback_author: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse the TOML content first as a raw table to detect unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "feed_url",
                "output_path",
                "user_agent",
                "youtube_channel_url",
                "fallback_author",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), feed = %config.feed_url, "Loaded configuration");
        Ok(config)
    }
}
