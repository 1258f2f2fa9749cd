//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Each tick runs
//! every stage to completion in a fixed order; platforms and walls are only
//! scrolled after the player has been resolved against them.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use super::bonus::{collect_bonuses, spawn_bonus};
use super::collision::resolve;
use super::demo::demo_intent;
use super::kinematics::{integrate, update_rotation};
use super::progression::update_score;
use super::scroll::scroll_world;
use super::state::{GameEvent, GamePhase, GameState, STAR_COLORS, Star};
use crate::consts::MAX_CATCHUP_TICKS;

/// Advance the game state by one tick. Does nothing after game over.
pub fn tick(state: &mut GameState) -> GamePhase {
    if state.phase == GamePhase::GameOver {
        return state.phase;
    }

    state.time_ticks += 1;

    if state.demo_mode {
        state.player.intent = demo_intent(state);
    }

    update_player(state);
    update_stars(state);
    scroll_world(state);
    spawn_bonus(state);
    collect_bonuses(state);
    update_score(state);

    let t = &state.tuning;
    if state.player.top_y(t) < -t.half_screen_height {
        let score = state.score.score();
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score });
        log::info!(
            "Game over after {} ticks: score {} (floor {})",
            state.time_ticks,
            score,
            state.player.highest_floor
        );
    }

    state.phase
}

/// Integrate, resolve collisions and animate the player
pub fn update_player(state: &mut GameState) {
    let t = &state.tuning;
    let player = &mut state.player;

    let step = integrate(player, t);
    if step.jumped {
        state.events.push(GameEvent::Jumped);
    }
    let was_grounded = player.can_jump;

    let res = resolve(player.pos, step.vel, &state.walls, &state.platforms, t);
    player.pos = res.pos;
    player.vel = res.vel;
    player.can_jump = res.grounded;

    if res.bounced {
        state.events.push(GameEvent::WallBounce);
    }
    if let Some(i) = res.platform {
        if !was_grounded {
            state.events.push(GameEvent::Landed {
                floor: state.platforms[i].floor,
            });
        }
    }

    let dy = player.vel.y;
    if player.last_dy <= t.celebration_threshold && t.celebration_threshold < dy {
        state.events.push(GameEvent::Celebration);
    }
    player.last_dy = dy;

    update_rotation(player, t);
}

/// Spawn stars while the player rises fast, then move and cull them
pub fn update_stars(state: &mut GameState) {
    let t = &state.tuning;

    if state.player.vel.y > t.jump_distance {
        let pos = Vec2::new(state.player.pos.x, state.player.feet_y(t));
        let color = state.rng.random_range(0..STAR_COLORS);
        let heading = state.rng.random_range(0..=360) as f32;
        state.stars.push(Star {
            pos,
            dy: 0.0,
            heading,
            color,
        });
        if state.stars.len() > t.max_stars {
            let excess = state.stars.len() - t.max_stars;
            state.stars.drain(..excess);
        }
    }

    for star in &mut state.stars {
        star.dy -= t.gravity;
        star.heading += t.star_rotation_speed;
        star.pos.y += star.dy;
    }
    let bottom = -t.half_screen_height;
    state.stars.retain(|s| s.pos.y >= bottom);
}

/// Converts elapsed wall time into whole ticks at the fixed frame interval
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    accumulator: Duration,
    max_catchup: u32,
}

impl FrameClock {
    pub fn new(frame_time_ms: u64) -> Self {
        Self {
            frame: Duration::from_millis(frame_time_ms),
            accumulator: Duration::ZERO,
            max_catchup: MAX_CATCHUP_TICKS,
        }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Add elapsed time; returns how many ticks are due (capped)
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.frame && due < self.max_catchup {
            self.accumulator -= self.frame;
            due += 1;
        }
        // Drop time we refused to catch up on
        if due == self.max_catchup {
            self.accumulator = Duration::ZERO;
        }
        due
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

/// Run the ticks due for `elapsed`, stopping at game over.
/// Returns the number of ticks simulated.
pub fn run_frame(state: &mut GameState, clock: &mut FrameClock, elapsed: Duration) -> u32 {
    run_frame_until(state, clock, elapsed, u64::MAX)
}

/// Like [`run_frame`], but never advances `time_ticks` past `max_ticks`
pub fn run_frame_until(
    state: &mut GameState,
    clock: &mut FrameClock,
    elapsed: Duration,
    max_ticks: u64,
) -> u32 {
    if state.is_game_over() || state.time_ticks >= max_ticks {
        clock.reset();
        return 0;
    }
    let due = clock.advance(elapsed);
    let mut ran = 0;
    for _ in 0..due {
        if state.time_ticks >= max_ticks {
            clock.reset();
            break;
        }
        ran += 1;
        if tick(state) == GamePhase::GameOver {
            clock.reset();
            break;
        }
    }
    ran
}
