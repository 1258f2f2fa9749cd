//! Render snapshot
//!
//! Converts a [`GameState`] into flat sprite instances plus HUD text. The
//! snapshot is read-only; drawing it is left to whichever front end hosts
//! the simulation.

pub mod instance;
pub mod sprites;

pub use instance::{SpriteInstance, colors};

use crate::sim::{GamePhase, GameState, pose};

/// Star quad half size (turtle shape at half scale)
const STAR_HALF_SIZE: f32 = 5.0;

/// Text overlay for the current frame
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score_text: String,
    pub score_color: [f32; 4],
    /// Final message, only after game over
    pub game_over: Option<String>,
    pub game_over_color: [f32; 4],
}

impl Hud {
    pub fn new(score: u64, phase: GamePhase) -> Self {
        Self {
            score_text: format!("Score: {}", score),
            score_color: colors::SCORE_TEXT,
            game_over: (phase == GamePhase::GameOver)
                .then(|| format!("Game over!\nFinal score: {}", score)),
            game_over_color: colors::GAME_OVER_TEXT,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// Back to front: platforms, bonuses, stars, player
    pub instances: Vec<SpriteInstance>,
    pub hud: Hud,
}

impl RenderFrame {
    /// Capture the visible entities. Walls are collision-only and skipped.
    pub fn capture(state: &GameState) -> Self {
        let t = &state.tuning;
        let visible = |y: f32, half: f32| {
            y + half >= -t.half_screen_height && y - half <= t.half_screen_height
        };

        let mut instances =
            Vec::with_capacity(state.platforms.len() + state.bonuses.len() + state.stars.len() + 1);

        for plat in &state.platforms {
            if !visible(plat.pos.y, t.platform_half_size) {
                continue;
            }
            let sprite = sprite_id(sprites::platform_sprite(plat.length));
            instances.push(SpriteInstance::new(
                plat.pos.x,
                plat.pos.y,
                plat.half_length(t),
                t.platform_half_size,
                sprite,
            ));
        }

        let bonus_sprite = sprite_id(sprites::BONUS);
        for bonus in &state.bonuses {
            if !visible(bonus.pos.y, bonus.hitbox) {
                continue;
            }
            let half = bonus.hitbox;
            instances.push(
                SpriteInstance::new(bonus.pos.x, bonus.pos.y, half, half, bonus_sprite)
                    .with_color(colors::BONUS),
            );
        }

        let star_sprite = sprite_id(sprites::STAR);
        for star in &state.stars {
            if !visible(star.pos.y, STAR_HALF_SIZE) {
                continue;
            }
            let color = colors::STARS[star.color as usize % colors::STARS.len()];
            let half = STAR_HALF_SIZE;
            instances.push(
                SpriteInstance::new(star.pos.x, star.pos.y, half, half, star_sprite)
                    .with_rotation(star.heading)
                    .with_color(color),
            );
        }

        let player = &state.player;
        if visible(player.pos.y, t.player_half_size) {
            let sprite = sprite_id(sprites::player_sprite(pose(player)));
            instances.push(SpriteInstance::new(
                player.pos.x,
                player.pos.y,
                t.player_half_size,
                t.player_half_size,
                sprite,
            ));
        }

        Self {
            instances,
            hud: Hud::new(state.score.score(), state.phase),
        }
    }
}

fn sprite_id(name: &str) -> u32 {
    sprites::atlas_index(name).unwrap_or_default()
}
