//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; the tick functions take it
//! by `&mut` and nothing else holds simulation state between ticks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::{InputEvent, Intent};
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks are being simulated
    Running,
    /// Player fell off the screen; waiting for a restart request
    GameOver,
}

/// Discrete things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Jump impulse applied
    Jumped,
    /// Vertical speed crossed the celebration threshold
    Celebration,
    /// Player bounced off a wall
    WallBounce,
    /// Player came to rest on a platform
    Landed { floor: u32 },
    BonusSpawned { id: u32 },
    BonusCollected { id: u32, points: u64 },
    /// New highest floor cleared
    FloorReached { floor: u32 },
    /// Scroll speed increased
    SpeedUp { speed: u32 },
    GameOver { score: u64 },
    Restarted { seed: u64 },
}

/// The climbing player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// (dx, dy) per tick
    pub vel: Vec2,
    pub intent: Intent,
    /// Standing on a surface this tick
    pub can_jump: bool,
    pub highest_floor: u32,
    /// dy at the end of the previous tick (celebration edge detection)
    pub last_dy: f32,
    /// Spin angle in degrees, [0, 360)
    pub rotation_angle: f32,
    /// Spin direction recorded at the last jump (1 or -1)
    pub spin_dir: i32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            intent: Intent::default(),
            can_jump: true,
            highest_floor: 0,
            last_dy: 0.0,
            rotation_angle: 0.0,
            spin_dir: 1,
        }
    }

    /// y of the player's feet
    #[inline]
    pub fn feet_y(&self, tuning: &Tuning) -> f32 {
        self.pos.y - tuning.player_half_size
    }

    /// y of the player's head
    #[inline]
    pub fn top_y(&self, tuning: &Tuning) -> f32 {
        self.pos.y + tuning.player_half_size
    }
}

/// A platform from the recycled pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    /// Length category (width = length * platform_unit)
    pub length: u32,
    pub floor: u32,
    /// Bonus spawned on this platform, if it is still alive
    pub bonus: Option<u32>,
}

impl Platform {
    pub fn new(pos: Vec2, length: u32, floor: u32) -> Self {
        Self {
            pos,
            length,
            floor,
            bonus: None,
        }
    }

    /// y of the walkable surface
    #[inline]
    pub fn top(&self, tuning: &Tuning) -> f32 {
        self.pos.y + tuning.platform_half_size
    }

    #[inline]
    pub fn half_length(&self, tuning: &Tuning) -> f32 {
        tuning.platform_half_length(self.length)
    }
}

/// A vertical boundary; only its x matters for collision
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wall {
    pub pos: Vec2,
}

/// A collectible bonus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub id: u32,
    pub pos: Vec2,
    pub value: u64,
    pub hitbox: f32,
}

/// Number of star colours in the palette
pub const STAR_COLORS: u8 = 8;

/// A cosmetic star thrown off by a running jump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub dy: f32,
    /// Degrees
    pub heading: f32,
    /// Palette index, < STAR_COLORS
    pub color: u8,
}

/// Score and difficulty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreState {
    /// highest_floor * floor_points
    pub floor_score: u64,
    /// Sum of collected bonus values
    pub bonus_score: u64,
    pub scroll_speed: u32,
    /// Score at which scroll speed next increases
    pub next_speed_up: u64,
}

impl ScoreState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            floor_score: 0,
            bonus_score: 0,
            scroll_speed: tuning.start_scroll_speed,
            next_speed_up: tuning.speed_up_score,
        }
    }

    /// Displayed score
    #[inline]
    pub fn score(&self) -> u64 {
        self.floor_score + self.bonus_score
    }
}

/// Complete run state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    #[serde(skip)]
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// One-way latch set once the player first climbs past scroll_threshold
    pub scroll_active: bool,
    /// Autopilot drives the intent flags
    pub demo_mode: bool,
    pub player: Player,
    /// Fixed pool in creation order; recycled in place
    pub platforms: Vec<Platform>,
    pub walls: Vec<Wall>,
    pub bonuses: Vec<Bonus>,
    pub stars: Vec<Star>,
    pub score: ScoreState,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let platforms = create_platforms(&tuning, &mut rng);
        let walls = tuning
            .wall_positions()
            .into_iter()
            .map(|x| Wall {
                pos: Vec2::new(x, 0.0),
            })
            .collect();
        let player = Player::new(Vec2::new(0.0, tuning.player_start_y()));
        let score = ScoreState::new(&tuning);

        Self {
            seed,
            tuning,
            rng,
            phase: GamePhase::Running,
            time_ticks: 0,
            scroll_active: false,
            demo_mode: false,
            player,
            platforms,
            walls,
            bonuses: Vec::new(),
            stars: Vec::new(),
            score,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Route an input event. Intent toggles are applied immediately and read
    /// by the next tick; Restart only acts after game over.
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.player.intent.apply(event) {
            return;
        }
        match event {
            InputEvent::Restart => {
                if self.phase == GamePhase::GameOver {
                    self.restart();
                }
            }
            InputEvent::ToggleDemo => {
                self.demo_mode = !self.demo_mode;
                if !self.demo_mode {
                    self.player.intent.clear();
                }
                log::info!("Demo mode: {}", self.demo_mode);
            }
            _ => {}
        }
    }

    /// Replace this run with a fresh one, keeping tuning and demo mode
    pub fn restart(&mut self) {
        let seed: u64 = self.rng.random();
        let demo_mode = self.demo_mode;
        *self = GameState::new(seed, self.tuning.clone());
        self.demo_mode = demo_mode;
        self.events.push(GameEvent::Restarted { seed });
        log::info!("Game restarted with seed: {}", seed);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Random x that keeps a platform of this length inside the playfield
pub fn random_platform_x(tuning: &Tuning, length: u32, rng: &mut Pcg32) -> f32 {
    let bound = tuning.platform_x_bound(length);
    rng.random_range(-bound..=bound) as f32
}

/// Ground platform (floor 0) followed by a stack of numbered platforms
pub fn create_platforms(tuning: &Tuning, rng: &mut Pcg32) -> Vec<Platform> {
    let ground_y = tuning.ground_y();
    let mut platforms = Vec::with_capacity(tuning.platform_count as usize + 1);
    platforms.push(Platform::new(
        Vec2::new(0.0, ground_y),
        tuning.floor_shape_length,
        0,
    ));

    for floor in 1..=tuning.platform_count {
        let length = rng.random_range(tuning.platform_min_length..=tuning.platform_max_length);
        let x = random_platform_x(tuning, length, rng);
        let y = ground_y + floor as f32 * tuning.platform_gap;
        platforms.push(Platform::new(Vec2::new(x, y), length, floor));
    }

    platforms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_world() {
        let state = GameState::new(7, Tuning::default());
        let t = &state.tuning;

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.platforms.len(), t.platform_count as usize + 1);
        assert_eq!(state.walls.len(), 2);
        assert!(state.player.can_jump);
        assert_eq!(state.player.pos, Vec2::new(0.0, t.player_start_y()));
        assert_eq!(state.score.score(), 0);
        assert_eq!(state.score.scroll_speed, 1);
        assert_eq!(state.score.next_speed_up, 3000);

        let ground = &state.platforms[0];
        assert_eq!(ground.floor, 0);
        assert_eq!(ground.pos, Vec2::new(0.0, t.ground_y()));
        // Player rests exactly on the ground
        assert_eq!(state.player.feet_y(t), ground.top(t));
    }

    #[test]
    fn test_platforms_on_screen_and_numbered() {
        let state = GameState::new(99, Tuning::default());
        let t = &state.tuning;
        for (i, plat) in state.platforms.iter().enumerate() {
            assert_eq!(plat.floor, i as u32);
            assert!(plat.pos.x.abs() + plat.half_length(t) <= t.floor_pixel_length / 2.0);
            if i > 0 {
                assert!((t.platform_min_length..=t.platform_max_length).contains(&plat.length));
                assert!(plat.pos.y > state.platforms[i - 1].pos.y);
            }
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = GameState::new(1234, Tuning::default());
        let b = GameState::new(1234, Tuning::default());
        for (pa, pb) in a.platforms.iter().zip(&b.platforms) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.length, pb.length);
        }
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut state = GameState::new(5, Tuning::default());
        state.player.pos.x = 42.0;
        state.handle_input(InputEvent::Restart);
        assert_eq!(state.player.pos.x, 42.0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = GameState::new(5, Tuning::default());
        state.score.bonus_score = 900;
        state.scroll_active = true;
        state.demo_mode = true;
        state.phase = GamePhase::GameOver;

        state.handle_input(InputEvent::Restart);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score.score(), 0);
        assert!(!state.scroll_active);
        assert!(state.demo_mode);
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::Restarted { .. }]
        ));
    }

    #[test]
    fn test_intent_events_reach_player() {
        let mut state = GameState::new(5, Tuning::default());
        state.handle_input(InputEvent::LeftDown);
        state.handle_input(InputEvent::JumpDown);
        assert!(state.player.intent.left);
        assert!(state.player.intent.jump);
        state.handle_input(InputEvent::LeftUp);
        assert!(!state.player.intent.left);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(5, Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
