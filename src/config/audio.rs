use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub music_enabled: bool,
    pub sound_enabled: bool,
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_enabled: true,
            volume: 0.5,
        }
    }
}
