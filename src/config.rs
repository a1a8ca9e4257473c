use crate::error::SlidesError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    pub theme: ThemeConfig,
    pub window: WindowConfig,
    pub navigation: NavigationConfig,
    pub playground: PlaygroundConfig,
    pub narration: NarrationConfig,
    pub deck: DeckConfig,
}

/// Theme configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ThemeConfig {
    /// "dark" or "light"
    pub mode: String,
}

/// Initial window size
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NavigationConfig {
    /// Visible share of a section that makes it the current slide
    pub visibility_threshold: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PlaygroundConfig {
    /// Simulated compile time
    pub run_delay_ms: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NarrationConfig {
    pub enabled: bool,
    /// Speech program to run; empty picks the first one found on PATH
    pub program: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DeckConfig {
    /// Deck file to present; empty uses the bundled Java OOP deck
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme: ThemeConfig {
                mode: "dark".to_string(),
            },
            window: WindowConfig {
                width: 1100.0,
                height: 760.0,
            },
            navigation: NavigationConfig {
                visibility_threshold: 0.5,
            },
            playground: PlaygroundConfig { run_delay_ms: 1500 },
            narration: NarrationConfig {
                enabled: true,
                program: String::new(),
                rate: 0.8,
                pitch: 1.0,
                volume: 0.8,
            },
            deck: DeckConfig {
                path: String::new(),
            },
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "oop-slides")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Config::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => return config,
                Err(e) => warn!("Failed to parse config file: {}", e),
            },
            Err(e) => warn!("Failed to read config file: {}", e),
        }
        info!("Using default configuration");
        Config::default()
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), SlidesError> {
        let path = Self::config_path().ok_or(SlidesError::NoDirectory("config"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SlidesError> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file if it doesn't exist
    pub fn create_default() -> Result<(), SlidesError> {
        if let Some(path) = Self::config_path() {
            if !path.exists() {
                Config::default().save_to(&path)?;
            }
        }
        Ok(())
    }

    pub fn run_delay(&self) -> Duration {
        Duration::from_millis(self.playground.run_delay_ms)
    }

    pub fn deck_path(&self) -> Option<PathBuf> {
        let path = self.deck.path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}
