//! Demo mode - a simple autopilot that plays the game
//!
//! Holds jump and steers toward the lowest platform above the player's feet.
//! It is not meant to be good, only to keep a headless run climbing.

use super::input::Intent;
use super::state::GameState;

/// Fraction of a platform's half-length the autopilot aims inside of
const AIM_SLACK: f32 = 0.5;

/// Intent the autopilot would hold this tick
pub fn demo_intent(state: &GameState) -> Intent {
    let t = &state.tuning;
    let player = &state.player;
    let feet_y = player.feet_y(t);

    let target = state
        .platforms
        .iter()
        .filter(|plat| plat.top(t) > feet_y + 1.0)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let mut intent = Intent {
        jump: true,
        ..Default::default()
    };

    if let Some(plat) = target {
        let dx = plat.pos.x - player.pos.x;
        let slack = plat.half_length(t) * AIM_SLACK;
        if dx > slack {
            intent.right = true;
        } else if dx < -slack {
            intent.left = true;
        }
    }

    intent
}
