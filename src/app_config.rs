use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Matching tunables
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Maximum number of films processed concurrently
    #[serde(default = "default_concurrent_films")]
    pub concurrent_films: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Tunable constants for the matching pipeline
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchingConfig {
    /// Minimum match probability for a (cue, lyric line) pair to be kept (exclusive)
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    /// Minimum token count on both sides for a pair to be scored (exclusive)
    #[serde(default = "default_min_token_count")]
    pub min_token_count: usize,

    /// Gap between matches above which a backward lyric jump starts a reprise
    #[serde(default = "default_reprise_gap_secs")]
    pub reprise_gap_secs: u64,

    /// Aggregated occurrences shorter than this are dropped as noise
    #[serde(default = "default_min_song_length_secs")]
    pub min_song_length_secs: u64,
}

impl MatchingConfig {
    /// Reprise gap threshold in milliseconds
    pub fn reprise_gap_ms(&self) -> i64 {
        (self.reprise_gap_secs * 1000) as i64
    }

    /// Minimum occurrence length in milliseconds
    pub fn min_song_length_ms(&self) -> u64 {
        self.min_song_length_secs * 1000
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            match_threshold: default_match_threshold(),
            min_token_count: default_min_token_count(),
            reprise_gap_secs: default_reprise_gap_secs(),
            min_song_length_secs: default_min_song_length_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_match_threshold() -> f64 {
    0.8
}

fn default_min_token_count() -> usize {
    2
}

fn default_reprise_gap_secs() -> u64 {
    60
}

fn default_min_song_length_secs() -> u64 {
    10
}

fn default_concurrent_films() -> usize {
    4
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !(self.matching.match_threshold > 0.0 && self.matching.match_threshold < 1.0) {
            return Err(anyhow!(
                "match_threshold must be strictly between 0 and 1, got {}",
                self.matching.match_threshold
            ));
        }

        if self.matching.min_token_count == 0 {
            return Err(anyhow!("min_token_count must be at least 1"));
        }

        if self.matching.reprise_gap_secs == 0 {
            return Err(anyhow!("reprise_gap_secs must be greater than 0"));
        }

        if self.matching.min_song_length_secs == 0 {
            return Err(anyhow!("min_song_length_secs must be greater than 0"));
        }

        if self.concurrent_films == 0 {
            return Err(anyhow!("concurrent_films must be at least 1"));
        }

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!("Failed to read config file {:?}: {}", path.as_ref(), e)
        })?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path.as_ref(), e))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json).map_err(|e| {
            anyhow!("Failed to write config file {:?}: {}", path.as_ref(), e)
        })?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            concurrent_films: default_concurrent_films(),
            log_level: LogLevel::default(),
        }
    }
}
