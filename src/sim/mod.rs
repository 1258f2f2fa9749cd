//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (pool/insertion order)
//! - No rendering, audio or platform dependencies

pub mod bonus;
pub mod collision;
pub mod demo;
pub mod input;
pub mod kinematics;
pub mod progression;
pub mod scroll;
pub mod state;
pub mod tick;

pub use collision::{Resolution, resolve};
pub use input::{InputEvent, Intent};
pub use kinematics::{Pose, integrate, pose};
pub use state::{
    Bonus, GameEvent, GamePhase, GameState, Platform, Player, STAR_COLORS, ScoreState, Star, Wall,
};
pub use tick::{FrameClock, run_frame, run_frame_until, tick};
