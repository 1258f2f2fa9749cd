//! Tower Climb - a vertical scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scrolling, scoring)
//! - `tuning`: Data-driven game balance
//! - `render`: Renderer-facing frame snapshot
//! - `audio`: Sound trigger mapping and playback seam

pub mod audio;
pub mod render;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Default tuning values (all units are pixels and ticks)
pub mod consts {
    /// Fixed frame interval in milliseconds (~60 Hz)
    pub const FRAME_TIME_MS: u64 = 16;
    /// Maximum ticks caught up per clock advance to prevent spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 5;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Horizontal movement
    pub const ACCELERATION: f32 = 0.6;
    pub const TURN_ACCELERATION: f32 = 1.2;
    pub const MAX_SPEED: f32 = 12.0;
    pub const NEG_MAX_SPEED: f32 = -12.0;
    pub const FRICTION: f32 = 0.8;
    pub const AIR_FRICTION: f32 = 0.98;
    /// Horizontal speeds below this snap to zero
    pub const DEAD_ZONE: f32 = 0.1;

    /// Vertical movement
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_DISTANCE: f32 = 14.0;
    pub const JUMP_FACTOR: f32 = 0.6;
    pub const WALL_BOUNCE_FACTOR: f32 = 0.8;
    /// Vertical speed that triggers the celebration sound
    pub const CELEBRATION_THRESHOLD: f32 = 20.0;

    /// Entity sizes
    pub const PLAYER_PIXEL_SIZE: f32 = 40.0;
    pub const PLAT_PIXEL_SIZE: f32 = 20.0;
    /// Width of one platform length unit
    pub const PLAT_UNIT: f32 = 20.0;
    pub const WALL_PIXEL_SIZE: f32 = 20.0;
    pub const PLAYER_COLLISION_TOLERANCE: f32 = 10.0;

    /// World layout
    pub const PLATFORM_GAP: f32 = 100.0;
    pub const PLATFORM_COUNT: u32 = 30;
    pub const PLATFORM_MIN_LENGTH: u32 = 6;
    pub const PLATFORM_MAX_LENGTH: u32 = 12;
    /// Ground platform spans the whole playfield
    pub const FLOOR_SHAPE_LENGTH: u32 = 36;
    pub const FLOOR_PIXEL_LENGTH: f32 = 720.0;
    /// Ground platform height above the bottom screen edge
    pub const GROUND_MARGIN: f32 = 40.0;

    /// Scrolling
    pub const SCROLL_THRESHOLD: f32 = -100.0;
    pub const FAST_SCROLL_Y: f32 = 200.0;
    pub const FAST_SCROLL_SPEED: u32 = 6;
    pub const START_SCROLL_SPEED: u32 = 1;
    pub const MAX_SCROLL_SPEED: u32 = 4;

    /// Scoring
    pub const FLOOR_POINTS: u64 = 100;
    pub const SPEED_UP_SCORE: u64 = 3000;
    pub const SPEED_UP_INCREMENT: u64 = 3000;

    /// Bonuses
    pub const BONUS_HITBOX: f32 = 20.0;
    pub const BONUS_VALUE: u64 = 500;
    /// One spawn in this many ticks on average
    pub const BONUS_SPAWN_ODDS: u32 = 300;
    pub const BONUS_LIFT: f32 = 20.0;
    pub const BONUS_SPACING_X: f32 = 15.0;
    pub const BONUS_SPACING_Y: f32 = 50.0;
    pub const BONUS_OFFSET_FACTOR: f32 = 8.0;

    /// Animation (degrees per tick)
    pub const ROTATION_SPEED: f32 = 15.0;
    pub const STAR_ROTATION_SPEED: f32 = 15.0;
    pub const MAX_STARS: usize = 256;
}

/// Sign of a horizontal velocity as -1, 0 or 1
#[inline]
pub fn sign(v: f32) -> i32 {
    (v > 0.0) as i32 - (v < 0.0) as i32
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign() {
        assert_eq!(sign(3.5), 1);
        assert_eq!(sign(-0.01), -1);
        assert_eq!(sign(0.0), 0);
    }

    #[test]
    fn test_distance() {
        let d = distance(Vec2::new(50.0, 50.0), Vec2::new(55.0, 53.0));
        assert!((d - 5.830_952).abs() < 1e-4);
    }
}
