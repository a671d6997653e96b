pub mod audio;
pub mod gameplay;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use log::warn;

pub use audio::AudioConfig;
pub use gameplay::GameplayConfig;

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gameplay: GameplayConfig,
    pub audio: AudioConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the default high score location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_score_path: Option<PathBuf>,
    /// Overrides the default memory-card high score location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_high_score_path: Option<PathBuf>,
}

impl Config {
    /// Snapshot of the global configuration. A poisoned lock yields defaults.
    #[must_use]
    pub fn current() -> Config {
        match CONFIG.read() {
            Ok(config) => config.clone(),
            Err(_) => {
                warn!("Configuration lock poisoned, using defaults");
                Config::default()
            }
        }
    }

    /// Replaces the global configuration.
    pub fn install(config: Config) {
        match CONFIG.write() {
            Ok(mut current) => *current = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }
}
