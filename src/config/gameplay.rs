use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::{DEFAULT_FRAME_RATE, DEFAULT_MIN_DROP_INTERVAL};

// Frame pacing and gravity settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub frame_rate: u32,
    pub min_drop_interval_ms: u64,
    /// Fixed piece sequence when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub show_ghost: bool,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            min_drop_interval_ms: u64::try_from(DEFAULT_MIN_DROP_INTERVAL.as_millis())
                .unwrap_or(100),
            seed: None,
            show_ghost: true,
        }
    }
}

impl GameplayConfig {
    /// Time budget of one frame. A zero frame rate falls back to the default.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        let rate = if self.frame_rate == 0 {
            DEFAULT_FRAME_RATE
        } else {
            self.frame_rate
        };
        Duration::from_secs(1) / rate
    }

    #[must_use]
    pub fn min_drop_interval(&self) -> Duration {
        Duration::from_millis(self.min_drop_interval_ms.max(1))
    }
}
