//! Configuration loaded from `Gobang.toml`
//!
//! Every section and key is optional; anything missing takes the value from
//! [`Config::default`], which mirrors the shipped `Gobang.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::engine::Difficulty;

/// Default config file, looked up relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "Gobang.toml";

/// Errors raised while reading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub game: GameConfig,
}

/// Search depth per difficulty and parallelism switches
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below each root move on easy
    pub easy_depth: u8,
    pub medium_depth: u8,
    pub hard_depth: u8,
    /// Root move count above which the root is split across threads
    pub parallel_threshold: usize,
    /// Sum the leaf evaluation row by row on the thread pool
    pub parallel_eval: bool,
    /// Dedicated search pool size; 0 uses rayon's global pool
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            easy_depth: 2,
            medium_depth: 3,
            hard_depth: 4,
            parallel_threshold: 4,
            parallel_eval: false,
            threads: 0,
        }
    }
}

impl SearchConfig {
    /// Search depth for a difficulty tier
    #[must_use]
    pub fn depth_for(&self, difficulty: Difficulty) -> u8 {
        match difficulty {
            Difficulty::Easy => self.easy_depth,
            Difficulty::Medium => self.medium_depth,
            Difficulty::Hard => self.hard_depth,
        }
    }
}

/// Game session defaults
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    /// The human plays Black and moves first
    pub human_first: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            human_first: true,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads `Gobang.toml` from the working directory
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_CONFIG_FILE)
    }

    /// Loads `Gobang.toml`, falling back to the built-in defaults
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("could not load {DEFAULT_CONFIG_FILE} ({e}), using built-in defaults");
            Self::default()
        })
    }
}
