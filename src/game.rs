#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

// Board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Largest shape matrix (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

// Spawn anchor for every new piece
pub const SPAWN_COL: i32 = BOARD_WIDTH as i32 / 2 - 1;
pub const SPAWN_ROW: i32 = 0;

// Points per lock, indexed by lines cleared, multiplied by level
pub const LINE_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

// Level progression
pub const STARTING_LEVEL: u32 = 1;
pub const POINTS_PER_LEVEL: u32 = 1000;

// Gravity timing
pub const BASE_DROP_INTERVAL: Duration = Duration::from_millis(1000);
pub const DROP_INTERVAL_STEP: Duration = Duration::from_millis(50);
pub const DEFAULT_MIN_DROP_INTERVAL: Duration = Duration::from_millis(100);

// Frame loop
pub const DEFAULT_FRAME_RATE: u32 = 60;
