#![warn(clippy::all, clippy::pedantic)]

//! Single-integer high score persisted as plain text.
//!
//! A missing or unparsable file reads as zero. Write failures are logged and
//! swallowed so a read-only disk never interrupts a game.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use log::{debug, warn};

pub const HIGH_SCORE_FILE: &str = "highscore.txt";
pub const MEMORY_HIGH_SCORE_FILE: &str = "memory_highscore.txt";

#[derive(Resource, Debug, Clone)]
pub struct HighScore {
    path: PathBuf,
    best: u32,
}

impl HighScore {
    /// Reads the stored score at `path`, treating any failure as zero.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = read_score(&path);
        debug!("High score {best} loaded from {}", path.display());
        Self { path, best }
    }

    /// Uses the configured override or `file_name` in the platform data
    /// directory.
    #[must_use]
    pub fn load_default(override_path: Option<&Path>, file_name: &str) -> Self {
        Self::load(default_path(override_path, file_name))
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records `score` if it beats the stored best and writes it out.
    /// Returns whether the best changed.
    pub fn submit(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(err) = self.save() {
            warn!("Could not save high score to {}: {err}", self.path.display());
        }
        true
    }

    fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, self.best.to_string())
    }
}

fn read_score(path: &Path) -> u32 {
    fs::read_to_string(path)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or(0)
}

#[must_use]
pub fn default_path(override_path: Option<&Path>, file_name: &str) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }
    match dirs::data_dir() {
        Some(dir) => dir.join("playfield").join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Best memory-card score, kept apart from the falling-block best.
#[derive(Resource, Debug, Clone)]
pub struct MemoryHighScore(pub HighScore);
