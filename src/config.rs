//! Configuration management for OmniSearch
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, CREATE_MIN_LEN, DEFAULT_COMMAND_CENTER_CHORD, DEFAULT_DEBOUNCE, DEFAULT_OPEN_CHORD,
    DEFAULT_RECENT_STORAGE_KEY, MIN_QUERY_LEN, RECENT_ACTIVITY_MAX_ITEMS,
};
use crate::shortcuts::Chord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Longest accepted debounce delay
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub shortcuts: ShortcutsConfig,
    pub recent_activity: RecentActivityConfig,
    pub logging: LoggingConfig,
}

/// Search behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before categories are queried
    pub debounce_ms: u64,
    /// Shorter queries never reach the categories
    pub min_query_len: usize,
    /// Minimum query length for the "create" affordance
    pub create_min_len: usize,
}

/// Global chords, written as `"ctrl+k"`, `"meta+shift+p"`, ...
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutsConfig {
    /// Toggle the overlay
    pub open: String,
    /// Open the overlay in command mode
    pub command_center: String,
}

/// Recent activity persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentActivityConfig {
    pub storage_key: String,
    pub max_items: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to file
    pub enabled: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            min_query_len: MIN_QUERY_LEN,
            create_min_len: CREATE_MIN_LEN,
        }
    }
}

impl Default for ShortcutsConfig {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN_CHORD.to_string(),
            command_center: DEFAULT_COMMAND_CENTER_CHORD.to_string(),
        }
    }
}

impl Default for RecentActivityConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_RECENT_STORAGE_KEY.to_string(),
            max_items: RECENT_ACTIVITY_MAX_ITEMS,
        }
    }
}

impl ShortcutsConfig {
    pub fn open_chord(&self) -> Result<Chord> {
        self.open
            .parse()
            .with_context(|| format!("Invalid shortcuts.open chord '{}'", self.open))
    }

    pub fn command_center_chord(&self) -> Result<Chord> {
        self.command_center
            .parse()
            .with_context(|| format!("Invalid shortcuts.command_center chord '{}'", self.command_center))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("omnisearch.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("omnisearch").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.search.debounce_ms > MAX_DEBOUNCE_MS {
            anyhow::bail!(
                "debounce_ms cannot exceed {} ms, got {}",
                MAX_DEBOUNCE_MS,
                self.search.debounce_ms
            );
        }

        if self.search.min_query_len == 0 {
            anyhow::bail!("min_query_len must be at least 1");
        }

        self.shortcuts.open_chord()?;
        self.shortcuts.command_center_chord()?;

        if self.recent_activity.max_items == 0 {
            anyhow::bail!("recent_activity.max_items must be at least 1");
        }
        if self.recent_activity.storage_key.is_empty() {
            anyhow::bail!("recent_activity.storage_key cannot be empty");
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# OmniSearch Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("omnisearch"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
