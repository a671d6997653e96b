pub mod app;
pub mod components;
pub mod config;
pub mod game;
pub mod highscore;
pub mod input;
pub mod memory_card;
pub mod menu;
pub mod menu_types;
pub mod particles;
pub mod playfield;
pub mod sound;
pub mod systems;
pub mod ui;
pub mod ui_memory_card;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::{Duration, Instant};

#[derive(Resource, Debug, Clone)]
pub struct Time {
    delta: Duration,
    last_update: Instant,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        Self {
            delta: Duration::default(),
            last_update: Instant::now(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_update);
        self.last_update = now;
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }
}
