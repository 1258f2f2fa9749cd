//! Game tuning and balance constants
//!
//! Every number the simulation consumes lives here so a run can be retuned
//! from a JSON file without recompiling. The simulation assumes a tuning
//! that passed [`Tuning::validate`].

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or checking a tuning
#[derive(Debug)]
pub enum TuningError {
    /// Tuning file could not be read or written
    Io(std::io::Error),
    /// Tuning file is not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// A value is out of its accepted range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "tuning io error: {}", e),
            TuningError::Parse(e) => write!(f, "tuning parse error: {}", e),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Horizontal movement ===
    pub acceleration: f32,
    /// Acceleration used when input opposes the current direction
    pub turn_acceleration: f32,
    pub max_speed: f32,
    pub negative_max_speed: f32,
    /// Multiplier applied to dx while grounded with no input
    pub ground_friction: f32,
    /// Multiplier applied to dx while airborne
    pub air_friction: f32,
    pub dead_zone: f32,

    // === Vertical movement ===
    pub gravity: f32,
    pub jump_distance: f32,
    /// Extra jump velocity per unit of horizontal speed
    pub jump_factor: f32,
    pub wall_bounce_factor: f32,
    pub celebration_threshold: f32,

    // === Entity sizes ===
    pub player_half_size: f32,
    pub platform_half_size: f32,
    /// Pixel width of one platform length unit
    pub platform_unit: f32,
    pub wall_pixel_size: f32,
    pub wall_half_size: f32,
    pub collision_tolerance: f32,

    // === Screen and world layout ===
    pub half_screen_width: f32,
    pub half_screen_height: f32,
    pub platform_gap: f32,
    pub platform_count: u32,
    pub platform_min_length: u32,
    pub platform_max_length: u32,
    pub floor_shape_length: u32,
    /// Width available to platforms between the walls
    pub floor_pixel_length: f32,

    // === Scrolling ===
    /// Player height that latches scrolling on
    pub scroll_threshold: f32,
    /// Player height above which the fast scroll speed is used
    pub fast_scroll_y: f32,
    pub fast_scroll_speed: u32,
    pub start_scroll_speed: u32,
    pub max_scroll_speed: u32,

    // === Scoring ===
    pub floor_points: u64,
    /// First score that raises the scroll speed
    pub speed_up_score: u64,
    pub speed_up_increment: u64,

    // === Bonuses ===
    pub bonus_hitbox: f32,
    pub bonus_value: u64,
    pub bonus_spawn_odds: u32,
    /// Height of a spawned bonus above the platform surface
    pub bonus_lift: f32,
    pub bonus_spacing_x: f32,
    pub bonus_spacing_y: f32,
    pub bonus_offset_factor: f32,

    // === Animation ===
    pub rotation_speed: f32,
    pub star_rotation_speed: f32,
    pub max_stars: usize,

    // === Timing ===
    pub frame_time_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            turn_acceleration: TURN_ACCELERATION,
            max_speed: MAX_SPEED,
            negative_max_speed: NEG_MAX_SPEED,
            ground_friction: FRICTION,
            air_friction: AIR_FRICTION,
            dead_zone: DEAD_ZONE,

            gravity: GRAVITY,
            jump_distance: JUMP_DISTANCE,
            jump_factor: JUMP_FACTOR,
            wall_bounce_factor: WALL_BOUNCE_FACTOR,
            celebration_threshold: CELEBRATION_THRESHOLD,

            player_half_size: PLAYER_PIXEL_SIZE / 2.0,
            platform_half_size: PLAT_PIXEL_SIZE / 2.0,
            platform_unit: PLAT_UNIT,
            wall_pixel_size: WALL_PIXEL_SIZE,
            wall_half_size: WALL_PIXEL_SIZE / 2.0,
            collision_tolerance: PLAYER_COLLISION_TOLERANCE,

            half_screen_width: SCREEN_WIDTH / 2.0,
            half_screen_height: SCREEN_HEIGHT / 2.0,
            platform_gap: PLATFORM_GAP,
            platform_count: PLATFORM_COUNT,
            platform_min_length: PLATFORM_MIN_LENGTH,
            platform_max_length: PLATFORM_MAX_LENGTH,
            floor_shape_length: FLOOR_SHAPE_LENGTH,
            floor_pixel_length: FLOOR_PIXEL_LENGTH,

            scroll_threshold: SCROLL_THRESHOLD,
            fast_scroll_y: FAST_SCROLL_Y,
            fast_scroll_speed: FAST_SCROLL_SPEED,
            start_scroll_speed: START_SCROLL_SPEED,
            max_scroll_speed: MAX_SCROLL_SPEED,

            floor_points: FLOOR_POINTS,
            speed_up_score: SPEED_UP_SCORE,
            speed_up_increment: SPEED_UP_INCREMENT,

            bonus_hitbox: BONUS_HITBOX,
            bonus_value: BONUS_VALUE,
            bonus_spawn_odds: BONUS_SPAWN_ODDS,
            bonus_lift: BONUS_LIFT,
            bonus_spacing_x: BONUS_SPACING_X,
            bonus_spacing_y: BONUS_SPACING_Y,
            bonus_offset_factor: BONUS_OFFSET_FACTOR,

            rotation_speed: ROTATION_SPEED,
            star_rotation_speed: STAR_ROTATION_SPEED,
            max_stars: MAX_STARS,

            frame_time_ms: FRAME_TIME_MS,
        }
    }
}

impl Tuning {
    /// y of the ground platform centre
    pub fn ground_y(&self) -> f32 {
        -self.half_screen_height + GROUND_MARGIN
    }

    /// y the player spawns at, resting on the ground platform
    pub fn player_start_y(&self) -> f32 {
        self.ground_y() + self.platform_half_size + self.player_half_size
    }

    /// x of the two boundary walls (right, left)
    pub fn wall_positions(&self) -> [f32; 2] {
        let x = self.half_screen_width - self.wall_pixel_size;
        [x, -x]
    }

    /// Half of a platform's width in pixels
    #[inline]
    pub fn platform_half_length(&self, length: u32) -> f32 {
        length as f32 * self.platform_unit / 2.0
    }

    /// Largest |x| that keeps a platform of this length fully on screen
    pub fn platform_x_bound(&self, length: u32) -> i32 {
        let spare = self.floor_pixel_length - length as f32 * self.platform_unit;
        (spare / 2.0).floor().max(0.0) as i32
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            ("acceleration", self.acceleration),
            ("turn_acceleration", self.turn_acceleration),
            ("max_speed", self.max_speed),
            ("negative_max_speed", self.negative_max_speed),
            ("ground_friction", self.ground_friction),
            ("air_friction", self.air_friction),
            ("dead_zone", self.dead_zone),
            ("gravity", self.gravity),
            ("jump_distance", self.jump_distance),
            ("jump_factor", self.jump_factor),
            ("wall_bounce_factor", self.wall_bounce_factor),
            ("celebration_threshold", self.celebration_threshold),
            ("player_half_size", self.player_half_size),
            ("platform_half_size", self.platform_half_size),
            ("platform_unit", self.platform_unit),
            ("wall_pixel_size", self.wall_pixel_size),
            ("wall_half_size", self.wall_half_size),
            ("collision_tolerance", self.collision_tolerance),
            ("half_screen_width", self.half_screen_width),
            ("half_screen_height", self.half_screen_height),
            ("platform_gap", self.platform_gap),
            ("floor_pixel_length", self.floor_pixel_length),
            ("scroll_threshold", self.scroll_threshold),
            ("fast_scroll_y", self.fast_scroll_y),
            ("bonus_hitbox", self.bonus_hitbox),
            ("bonus_lift", self.bonus_lift),
            ("bonus_spacing_x", self.bonus_spacing_x),
            ("bonus_spacing_y", self.bonus_spacing_y),
            ("bonus_offset_factor", self.bonus_offset_factor),
            ("rotation_speed", self.rotation_speed),
            ("star_rotation_speed", self.star_rotation_speed),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }

        let positive = [
            ("platform_gap", self.platform_gap),
            ("half_screen_width", self.half_screen_width),
            ("half_screen_height", self.half_screen_height),
            ("player_half_size", self.player_half_size),
            ("platform_half_size", self.platform_half_size),
            ("platform_unit", self.platform_unit),
            ("max_speed", self.max_speed),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }

        if self.negative_max_speed >= 0.0 {
            return Err(TuningError::Invalid {
                field: "negative_max_speed",
                reason: "must be negative",
            });
        }
        for (field, value) in [
            ("ground_friction", self.ground_friction),
            ("air_friction", self.air_friction),
        ] {
            if value <= 0.0 || value > 1.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be in (0, 1]",
                });
            }
        }
        if self.platform_min_length == 0 || self.platform_min_length > self.platform_max_length {
            return Err(TuningError::Invalid {
                field: "platform_min_length",
                reason: "must be non-zero and not above platform_max_length",
            });
        }
        let widest = self.platform_max_length.max(self.floor_shape_length);
        if widest as f32 * self.platform_unit > self.floor_pixel_length {
            return Err(TuningError::Invalid {
                field: "floor_pixel_length",
                reason: "narrower than the longest platform",
            });
        }
        if self.bonus_spawn_odds == 0 {
            return Err(TuningError::Invalid {
                field: "bonus_spawn_odds",
                reason: "must be at least 1",
            });
        }
        if self.max_scroll_speed == 0 || self.start_scroll_speed > self.max_scroll_speed {
            return Err(TuningError::Invalid {
                field: "max_scroll_speed",
                reason: "must be non-zero and not below start_scroll_speed",
            });
        }
        if self.speed_up_increment == 0 {
            return Err(TuningError::Invalid {
                field: "speed_up_increment",
                reason: "must be non-zero",
            });
        }
        if self.frame_time_ms == 0 {
            return Err(TuningError::Invalid {
                field: "frame_time_ms",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }

    /// Parse and validate a tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        if let Err(e) = tuning.validate() {
            log::warn!("Rejected tuning: {}", e);
            return Err(e);
        }
        Ok(tuning)
    }

    /// Load a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Write this tuning as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TuningError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Tuning saved to {}", path.as_ref().display());
        Ok(())
    }
}
