//! Floor-based scoring and difficulty
//!
//! The floor component of the score is a direct function of the highest
//! floor the player has stood above; bonus points are kept separately so a
//! later floor never wipes them out.

use super::state::{GameEvent, GameState};

/// Highest floor whose surface is at or below the player's feet
pub fn best_floor(state: &GameState) -> Option<u32> {
    let t = &state.tuning;
    let feet_y = state.player.feet_y(t);
    state
        .platforms
        .iter()
        .filter(|plat| plat.top(t) <= feet_y)
        .map(|plat| plat.floor)
        .max()
}

/// Update the floor score and apply at most one speed-up per tick
pub fn update_score(state: &mut GameState) {
    if let Some(floor) = best_floor(state) {
        if floor > state.player.highest_floor {
            state.player.highest_floor = floor;
            state.score.floor_score = floor as u64 * state.tuning.floor_points;
            state.events.push(GameEvent::FloorReached { floor });
        }
    }

    let t = &state.tuning;
    let score = &mut state.score;
    if score.score() >= score.next_speed_up && score.scroll_speed < t.max_scroll_speed {
        score.scroll_speed += 1;
        score.next_speed_up += t.speed_up_increment;
        let speed = score.scroll_speed;
        state.events.push(GameEvent::SpeedUp { speed });
        log::info!("Scroll speed up: {}", speed);
    }
}
