//! Collision detection and response for the player
//!
//! Walls are resolved first against the tentative horizontal position, then
//! platforms against the current position. Platforms are one-way: they are
//! only tested while the player is falling or at rest.

use glam::Vec2;

use super::kinematics::apply_dead_zone;
use super::state::{Platform, Wall};
use crate::tuning::Tuning;

/// Result of a wall pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    /// Corrected x if a wall was hit
    pub x: Option<f32>,
    pub vel: Vec2,
}

/// Reflect off any wall the tentative move penetrates.
///
/// The bounce adds upward velocity proportional to the reflected speed, so a
/// fast wall hit kicks the player up.
pub fn resolve_walls(current: Vec2, vel: Vec2, walls: &[Wall], tuning: &Tuning) -> WallContact {
    let next_x = current.x + vel.x;
    let player_left = next_x - tuning.player_half_size;
    let player_right = next_x + tuning.player_half_size;
    let bounce = tuning.wall_bounce_factor;

    let mut vel = vel;
    let mut x = None;

    for wall in walls {
        let wall_x = wall.pos.x;
        let wall_left = wall_x - tuning.wall_half_size;
        let wall_right = wall_x + tuning.wall_half_size;

        if player_right > wall_left && current.x < wall_x {
            x = Some(wall_left - tuning.player_half_size);
            vel.x = -vel.x.abs() * bounce;
            vel.y += vel.x.abs() * bounce;
        } else if player_left < wall_right && current.x > wall_x {
            x = Some(wall_right + tuning.player_half_size);
            vel.x = vel.x.abs() * bounce;
            vel.y += vel.x.abs() * bounce;
        }
    }

    WallContact { x, vel }
}

/// Find the platform whose top the player would pass through this tick.
///
/// First match in pool order wins; returns its index.
pub fn find_landing(current: Vec2, dy: f32, platforms: &[Platform], tuning: &Tuning) -> Option<usize> {
    if dy > 0.0 {
        return None;
    }
    let player_bottom = current.y - tuning.player_half_size;
    let reach = (-dy).max(1.0);
    let tolerance = tuning.collision_tolerance;

    platforms.iter().position(|plat| {
        let top = plat.top(tuning);
        let half = plat.half_length(tuning);
        let left = plat.pos.x - half - tolerance;
        let right = plat.pos.x + half + tolerance;
        (left..=right).contains(&current.x) && (player_bottom - top).abs() <= reach
    })
}

/// Fully resolved player motion for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Standing on a platform after this tick
    pub grounded: bool,
    pub bounced: bool,
    /// Index of the platform landed on
    pub platform: Option<usize>,
}

/// Correct a tentative move against walls and platforms
pub fn resolve(
    current: Vec2,
    vel: Vec2,
    walls: &[Wall],
    platforms: &[Platform],
    tuning: &Tuning,
) -> Resolution {
    let contact = resolve_walls(current, vel, walls, tuning);
    let mut vel = contact.vel;

    let platform = find_landing(current, vel.y, platforms, tuning);
    let y = match platform {
        Some(i) => {
            vel.y = 0.0;
            platforms[i].top(tuning) + tuning.player_half_size
        }
        None => current.y + vel.y,
    };

    vel.x = apply_dead_zone(vel.x, tuning);
    let x = contact.x.unwrap_or(current.x + vel.x);

    Resolution {
        pos: Vec2::new(x, y),
        vel,
        grounded: platform.is_some(),
        bounced: contact.x.is_some(),
        platform,
    }
}
