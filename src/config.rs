use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Mood;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    File,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_backend")]
    pub storage_backend: StorageBackend,
    /// Database file for `sqlite`, directory for `file`; empty means the profile default
    #[serde(default)]
    pub storage_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_mood")]
    pub default_mood: Mood,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    /// Set at load time; not part of the file
    #[serde(skip)]
    pub profile: Option<utils::Profile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_save")]
    pub save: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_next_focus")]
    pub next_focus: String,
    #[serde(default = "default_mood_prev")]
    pub mood_prev: String,
    #[serde(default = "default_mood_next")]
    pub mood_next: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_highlight_fg")]
    pub highlight_fg: String,
    #[serde(default = "default_muted_fg")]
    pub muted_fg: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_backend: default_storage_backend(),
            storage_path: String::new(),
            log_level: default_log_level(),
            default_mood: default_mood(),
            date_format: default_date_format(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            profile: None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            save: default_save(),
            help: default_help(),
            next_focus: default_next_focus(),
            mood_prev: default_mood_prev(),
            mood_next: default_mood_next(),
            list_up: default_list_up(),
            list_down: default_list_down(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: default_highlight_fg(),
            muted_fg: default_muted_fg(),
        }
    }
}

impl Theme {
    /// Get preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();

        themes.insert("default".to_string(), Theme::default());

        themes.insert("dark".to_string(), Theme {
            fg: "white".to_string(),
            bg: "black".to_string(),
            highlight_bg: "cyan".to_string(),
            highlight_fg: "black".to_string(),
            muted_fg: "darkgray".to_string(),
        });

        themes.insert("light".to_string(), Theme {
            fg: "black".to_string(),
            bg: "white".to_string(),
            highlight_bg: "blue".to_string(),
            highlight_fg: "white".to_string(),
            muted_fg: "gray".to_string(),
        });

        themes
    }
}

// Default value functions
fn default_storage_backend() -> StorageBackend {
    StorageBackend::Sqlite
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_mood() -> Mood {
    Mood::Happy
}

fn default_date_format() -> String {
    "%b %-d, %Y at %-I:%M %p".to_string()
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_save() -> String {
    "Ctrl+s".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_next_focus() -> String {
    "Tab".to_string()
}

fn default_mood_prev() -> String {
    "Left".to_string()
}

fn default_mood_next() -> String {
    "Right".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_highlight_fg() -> String {
    "white".to_string()
}

fn default_muted_fg() -> String {
    "darkgray".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Unsupported date_format: {0:?}")]
    InvalidDateFormat(String),
}

impl Config {
    /// Load configuration from the profile's config directory, or create
    /// and save the defaults if the file is missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        Self::load_from_path(&config_path, profile)
    }

    /// Load configuration from an explicit file path
    pub fn load_from_path(config_path: &Path, profile: utils::Profile) -> Result<Self, ConfigError> {
        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config = toml::from_str::<Config>(&contents)?;
            if !utils::is_valid_date_format(&config.date_format) {
                return Err(ConfigError::InvalidDateFormat(config.date_format));
            }
            config
        } else {
            let config = Config::default();
            if let Err(e) = config.save_to_path(config_path) {
                eprintln!("ERROR: Failed to save config file: {}", e);
                eprintln!("Config path: {:?}", config_path);
                return Err(e);
            }
            config
        };
        config.profile = Some(profile);
        Ok(config)
    }

    pub fn save_to_path(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    fn profile(&self) -> utils::Profile {
        self.profile.unwrap_or(utils::Profile::Prod)
    }

    /// Directory holding storage and logs for the active profile
    pub fn get_data_dir(&self) -> PathBuf {
        utils::get_data_dir(self.profile()).unwrap_or_else(|| match self.profile() {
            utils::Profile::Dev => utils::expand_path("~/.local/share/mood-tracker-dev"),
            utils::Profile::Prod => utils::expand_path("~/.local/share/mood-tracker"),
        })
    }

    /// Get the expanded storage path, falling back to the profile default
    pub fn get_storage_path(&self) -> PathBuf {
        if !self.storage_path.trim().is_empty() {
            return utils::expand_path(self.storage_path.trim());
        }
        match self.storage_backend {
            StorageBackend::File => self.get_data_dir().join("slots"),
            StorageBackend::Sqlite | StorageBackend::Memory => self.get_data_dir().join("mood.db"),
        }
    }

    pub fn get_log_dir(&self) -> PathBuf {
        self.get_data_dir().join("logs")
    }

    /// Get the currently active theme (user-defined first, then presets)
    pub fn get_active_theme(&self) -> Theme {
        if let Some(theme) = self.themes.get(&self.current_theme) {
            return theme.clone();
        }
        Theme::get_preset_themes()
            .remove(&self.current_theme)
            .unwrap_or_default()
    }
}
