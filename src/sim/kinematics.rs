//! Player kinematics
//!
//! Arcade model, one step per tick: input acceleration, jump impulse, then
//! gravity and friction, then a speed clamp. The result is a tentative
//! velocity that the collision resolver corrects.

use glam::Vec2;

use super::state::Player;
use crate::sign;
use crate::tuning::Tuning;

/// Number of spin sprites (45 degrees each)
pub const SPIN_FRAMES: u8 = 8;
const DEGREES_PER_FRAME: f32 = 360.0 / SPIN_FRAMES as f32;

/// Output of one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integration {
    /// Tentative (dx, dy) for this tick
    pub vel: Vec2,
    /// Jump impulse was applied this tick
    pub jumped: bool,
}

/// Advance the player's velocity for one tick.
///
/// Mutates `can_jump`, `spin_dir` and `vel.y` when a jump triggers; the
/// returned velocity is written back by the caller after collision.
pub fn integrate(player: &mut Player, tuning: &Tuning) -> Integration {
    let intent = player.intent;
    let mut dx = player.vel.x;

    // Both directions held cancel out; opposing input turns faster than it
    // accelerates
    let steering = intent.left != intent.right;
    if steering && intent.right {
        dx += if dx < 0.0 {
            tuning.turn_acceleration
        } else {
            tuning.acceleration
        };
    }
    if steering && intent.left {
        dx -= if dx > 0.0 {
            tuning.turn_acceleration
        } else {
            tuning.acceleration
        };
    }

    let mut jumped = false;
    if intent.jump && player.can_jump {
        player.vel.y = tuning.jump_distance + dx.abs() * tuning.jump_factor;
        player.can_jump = false;
        player.spin_dir = if dx >= 0.0 { 1 } else { -1 };
        jumped = true;
    }

    let mut dy = player.vel.y;
    if !player.can_jump {
        dy -= tuning.gravity;
        dx *= tuning.air_friction;
    } else if !intent.horizontal() {
        dx *= tuning.ground_friction;
    }

    dx = dx.clamp(tuning.negative_max_speed, tuning.max_speed);

    Integration {
        vel: Vec2::new(dx, dy),
        jumped,
    }
}

/// Snap infinitesimal horizontal drift to zero
#[inline]
pub fn apply_dead_zone(dx: f32, tuning: &Tuning) -> f32 {
    if dx.abs() < tuning.dead_zone { 0.0 } else { dx }
}

/// Visual pose derived from the player's motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    /// Airborne and moving sideways; frame in [0, SPIN_FRAMES)
    Spinning { frame: u8 },
    /// Grounded or falling straight; facing is -1, 0 or 1
    Standing { facing: i32 },
}

/// Advance the spin animation after the tick's final velocity is known
pub fn update_rotation(player: &mut Player, tuning: &Tuning) {
    if !player.can_jump && player.vel.x != 0.0 {
        let step = tuning.rotation_speed * player.spin_dir as f32;
        player.rotation_angle = (player.rotation_angle + step).rem_euclid(360.0);
    } else {
        player.rotation_angle = 0.0;
    }
}

pub fn pose(player: &Player) -> Pose {
    if !player.can_jump && player.vel.x != 0.0 {
        let frame = (player.rotation_angle / DEGREES_PER_FRAME) as u8 % SPIN_FRAMES;
        Pose::Spinning { frame }
    } else {
        Pose::Standing {
            facing: sign(player.vel.x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Intent;
    use proptest::prelude::*;

    fn grounded_player() -> Player {
        Player::new(Vec2::new(0.0, 0.0))
    }

    #[test]
    fn test_base_acceleration() {
        let t = Tuning::default();
        let mut p = grounded_player();
        p.intent.right = true;
        let step = integrate(&mut p, &t);
        assert!((step.vel.x - t.acceleration).abs() < 1e-6);
        assert!(!step.jumped);
    }

    #[test]
    fn test_turn_acceleration_when_reversing() {
        let t = Tuning::default();
        let mut p = grounded_player();
        p.vel.x = 5.0;
        p.intent.left = true;
        let step = integrate(&mut p, &t);
        assert!((step.vel.x - (5.0 - t.turn_acceleration)).abs() < 1e-6);
    }

    #[test]
    fn test_both_held_cancel() {
        let t = Tuning::default();
        let mut p = grounded_player();
        p.intent = Intent {
            left: true,
            right: true,
            jump: false,
        };
        let mut dxs = Vec::new();
        for _ in 0..4 {
            let step = integrate(&mut p, &t);
            p.vel = step.vel;
            dxs.push(step.vel.x);
        }
        assert_eq!(dxs, vec![0.0; 4]);

        // Moving keeps its speed: no push either way, no ground friction
        p.vel.x = 5.0;
        assert_eq!(integrate(&mut p, &t).vel.x, 5.0);
    }

    #[test]
    fn test_ground_friction_without_input() {
        let t = Tuning::default();
        let mut p = grounded_player();
        p.vel.x = 5.0;
        let step = integrate(&mut p, &t);
        assert!((step.vel.x - 5.0 * t.ground_friction).abs() < 1e-6);
        assert_eq!(step.vel.y, 0.0);
    }

    #[test]
    fn test_jump_scales_with_horizontal_speed() {
        let t = Tuning::default();
        let mut p = grounded_player();
        p.vel.x = -10.0;
        p.intent.jump = true;
        p.intent.left = true;

        let step = integrate(&mut p, &t);
        let dx_at_jump = -10.0 - t.acceleration;

        assert!(step.jumped);
        assert!(!p.can_jump);
        assert_eq!(p.spin_dir, -1);
        let expected_dy = t.jump_distance + dx_at_jump.abs() * t.jump_factor - t.gravity;
        assert!((step.vel.y - expected_dy).abs() < 1e-5);
        assert!((step.vel.x - dx_at_jump * t.air_friction).abs() < 1e-5);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let t = Tuning::default();
        let mut p = grounded_player();
        p.can_jump = false;
        p.vel.y = 3.0;
        p.intent.jump = true;
        let step = integrate(&mut p, &t);
        assert!(!step.jumped);
        assert!((step.vel.y - (3.0 - t.gravity)).abs() < 1e-6);
    }

    #[test]
    fn test_standing_jump_spins_forward() {
        let t = Tuning::default();
        let mut p = grounded_player();
        p.spin_dir = -1;
        p.intent.jump = true;
        integrate(&mut p, &t);
        assert_eq!(p.spin_dir, 1);
    }

    #[test]
    fn test_speed_clamped() {
        let t = Tuning::default();
        let mut p = grounded_player();
        p.vel.x = t.max_speed;
        p.intent.right = true;
        assert_eq!(integrate(&mut p, &t).vel.x, t.max_speed);
    }

    #[test]
    fn test_dead_zone() {
        let t = Tuning::default();
        assert_eq!(apply_dead_zone(0.05, &t), 0.0);
        assert_eq!(apply_dead_zone(-0.099, &t), 0.0);
        assert_eq!(apply_dead_zone(0.2, &t), 0.2);
    }

    #[test]
    fn test_pose_spins_while_airborne() {
        let t = Tuning::default();
        let mut p = grounded_player();
        p.can_jump = false;
        p.vel.x = 3.0;
        p.spin_dir = -1;
        update_rotation(&mut p, &t);
        assert_eq!(p.rotation_angle, 360.0 - t.rotation_speed);
        assert_eq!(pose(&p), Pose::Spinning { frame: 7 });
    }

    #[test]
    fn test_pose_resets_on_ground() {
        let t = Tuning::default();
        let mut p = grounded_player();
        p.rotation_angle = 90.0;
        p.vel.x = -2.0;
        update_rotation(&mut p, &t);
        assert_eq!(p.rotation_angle, 0.0);
        assert_eq!(pose(&p), Pose::Standing { facing: -1 });
    }

    proptest! {
        #[test]
        fn prop_dx_always_clamped(
            dx in -50.0f32..50.0,
            dy in -30.0f32..30.0,
            left in any::<bool>(),
            right in any::<bool>(),
            jump in any::<bool>(),
            can_jump in any::<bool>(),
        ) {
            let t = Tuning::default();
            let mut p = grounded_player();
            p.vel = Vec2::new(dx, dy);
            p.can_jump = can_jump;
            p.intent = Intent { left, right, jump };
            let step = integrate(&mut p, &t);
            prop_assert!(step.vel.x >= t.negative_max_speed && step.vel.x <= t.max_speed);
        }

        #[test]
        fn prop_jump_iff_held_and_supported(
            jump in any::<bool>(),
            can_jump in any::<bool>(),
            dx in -12.0f32..12.0,
        ) {
            let t = Tuning::default();
            let mut p = grounded_player();
            p.vel.x = dx;
            p.can_jump = can_jump;
            p.intent.jump = jump;
            let step = integrate(&mut p, &t);
            prop_assert_eq!(step.jumped, jump && can_jump);
            if step.jumped {
                prop_assert!(!p.can_jump);
            }
        }
    }
}
