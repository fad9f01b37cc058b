// Fixed game constants. None of these are read from the environment.

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// Largest bounding box any catalog shape (or its rotation) may occupy.
pub const MAX_SHAPE_DIM: usize = 5;

pub const BASE_FALL_INTERVAL_MS: u32 = 1000;
pub const MIN_FALL_INTERVAL_MS: u32 = 100;
pub const FALL_SPEEDUP_PER_LEVEL_MS: u32 = 50;

pub const LINES_PER_LEVEL: u32 = 10;
pub const POINTS_PER_LINE: u32 = 100; // multiplied by the current level
pub const SOFT_DROP_POINTS: u32 = 1;

// Frontend layout.
pub const TILE_SIZE: f32 = 30.0;
pub const PREVIEW_TILE_SIZE: f32 = 25.0;
pub const PREVIEW_BOX: f32 = 5.0 * PREVIEW_TILE_SIZE;

// Frontend audio.
pub const MASTER_VOLUME: f32 = 0.3;
pub const SAMPLE_RATE: u32 = 44_100;
pub const ATTACK_SECS: f32 = 0.01;
pub const DECAY_FLOOR: f32 = 0.001;
