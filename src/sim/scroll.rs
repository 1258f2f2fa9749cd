//! World scrolling and platform recycling
//!
//! Once the player climbs past the scroll threshold the whole world moves
//! down every tick. Platforms that drop below the screen are moved to the top
//! of the stack and renumbered, so the pool never grows.

use glam::Vec2;

use super::state::{GameState, random_platform_x};

/// Scroll speed for this tick, or None while the latch is still open
pub fn scroll_speed(state: &mut GameState) -> Option<f32> {
    let t = &state.tuning;
    let y = state.player.pos.y;

    if !state.scroll_active && y > t.scroll_threshold {
        state.scroll_active = true;
        log::info!("Scrolling started at tick {}", state.time_ticks);
    }
    if !state.scroll_active {
        return None;
    }

    let speed = if y > t.fast_scroll_y {
        t.fast_scroll_speed
    } else {
        state.score.scroll_speed
    };
    Some(speed as f32)
}

/// Shift every world object down, recycle fallen platforms and drop fallen bonuses
pub fn scroll_world(state: &mut GameState) {
    let Some(speed) = scroll_speed(state) else {
        return;
    };
    let shift = Vec2::new(0.0, -speed);

    for plat in &mut state.platforms {
        plat.pos += shift;
    }
    for wall in &mut state.walls {
        wall.pos += shift;
    }
    state.player.pos += shift;
    for star in &mut state.stars {
        star.pos += shift;
    }
    for bonus in &mut state.bonuses {
        bonus.pos += shift;
    }

    recycle_platforms(state);
    remove_fallen_bonuses(state);
}

/// Move platforms whose top fell below the screen to the top of the stack
pub fn recycle_platforms(state: &mut GameState) {
    let t = &state.tuning;
    let bottom = -t.half_screen_height;

    let mut recycle = Vec::new();
    let mut top_y = f32::NEG_INFINITY;
    let mut max_floor = 0;
    for (i, plat) in state.platforms.iter().enumerate() {
        if plat.top(t) < bottom {
            recycle.push(i);
        } else {
            top_y = top_y.max(plat.pos.y);
            max_floor = max_floor.max(plat.floor);
        }
    }
    if recycle.is_empty() {
        return;
    }
    if top_y == f32::NEG_INFINITY {
        // Whole pool fell at once; restart the stack from the screen bottom
        // and keep numbering above anything already reached
        top_y = bottom;
        max_floor = state.player.highest_floor;
    }

    let mut next_floor = max_floor + 1;
    for i in recycle {
        top_y += t.platform_gap;
        let length = state.platforms[i].length;
        let x = random_platform_x(t, length, &mut state.rng);

        let plat = &mut state.platforms[i];
        plat.pos = Vec2::new(x, top_y);
        plat.floor = next_floor;
        plat.bonus = None;
        log::debug!("Recycled platform to floor {} at ({:.0}, {:.0})", next_floor, x, top_y);
        next_floor += 1;
    }
}

/// Discard bonuses that scrolled off the bottom
pub fn remove_fallen_bonuses(state: &mut GameState) {
    let bottom = -state.tuning.half_screen_height;
    let fallen: Vec<u32> = state
        .bonuses
        .iter()
        .filter(|b| b.pos.y < bottom)
        .map(|b| b.id)
        .collect();
    if fallen.is_empty() {
        return;
    }

    state.bonuses.retain(|b| !fallen.contains(&b.id));
    for plat in &mut state.platforms {
        if plat.bonus.is_some_and(|id| fallen.contains(&id)) {
            plat.bonus = None;
        }
    }
}
