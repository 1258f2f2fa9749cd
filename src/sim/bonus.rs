//! Bonus spawning and pickup

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Bonus, GameEvent, GameState};
use crate::distance;

/// Platforms a new bonus may spawn on: far enough above the player, not too
/// far ahead, and without a bonus already sitting on them
pub fn eligible_platforms(state: &GameState) -> Vec<usize> {
    let t = &state.tuning;
    let player_y = state.player.pos.y;
    let min_y = player_y + t.platform_gap * 1.5;
    let max_y = player_y + t.half_screen_height * 1.5;

    state
        .platforms
        .iter()
        .enumerate()
        .filter(|(_, plat)| plat.pos.y > min_y && plat.pos.y < max_y)
        .filter(|(_, plat)| {
            let spacing_x = plat.length as f32 * t.bonus_spacing_x;
            !state.bonuses.iter().any(|b| {
                (b.pos.x - plat.pos.x).abs() < spacing_x
                    && (b.pos.y - plat.pos.y).abs() < t.bonus_spacing_y
            })
        })
        .map(|(i, _)| i)
        .collect()
}

/// Roll the per-tick spawn chance and place a bonus on a random eligible platform
pub fn spawn_bonus(state: &mut GameState) -> Option<u32> {
    let odds = state.tuning.bonus_spawn_odds;
    if !state.rng.random_ratio(1, odds) {
        return None;
    }
    force_spawn_bonus(state)
}

/// Place a bonus without rolling the spawn chance
pub fn force_spawn_bonus(state: &mut GameState) -> Option<u32> {
    let eligible = eligible_platforms(state);
    let &index = eligible.choose(&mut state.rng)?;

    let t = &state.tuning;
    let plat = &state.platforms[index];
    let max_offset = (plat.length as f32 * t.bonus_offset_factor) as i32;
    let offset = state.rng.random_range(-max_offset..=max_offset) as f32;
    let pos = Vec2::new(plat.pos.x + offset, plat.top(t) + t.bonus_lift);
    let (value, hitbox) = (t.bonus_value, t.bonus_hitbox);

    let id = state.next_entity_id();
    state.bonuses.push(Bonus {
        id,
        pos,
        value,
        hitbox,
    });
    state.platforms[index].bonus = Some(id);
    state.events.push(GameEvent::BonusSpawned { id });
    log::debug!(
        "Bonus spawned at ({:.0}, {:.0}) - player at {:.0}",
        pos.x,
        pos.y,
        state.player.pos.y
    );
    Some(id)
}

/// Award and remove every bonus within its hitbox of the player.
/// Returns the points awarded this tick.
pub fn collect_bonuses(state: &mut GameState) -> u64 {
    let player_pos = state.player.pos;
    let collected: Vec<(u32, u64)> = state
        .bonuses
        .iter()
        .filter(|b| distance(player_pos, b.pos) < b.hitbox)
        .map(|b| (b.id, b.value))
        .collect();
    if collected.is_empty() {
        return 0;
    }

    let mut total = 0;
    for &(id, points) in &collected {
        total += points;
        state.events.push(GameEvent::BonusCollected { id, points });
        log::debug!("Bonus collected! +{} points", points);
    }
    state.score.bonus_score += total;

    state
        .bonuses
        .retain(|b| !collected.iter().any(|&(id, _)| id == b.id));
    for plat in &mut state.platforms {
        if plat
            .bonus
            .is_some_and(|id| collected.iter().any(|&(c, _)| c == id))
        {
            plat.bonus = None;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Platform;
    use crate::tuning::Tuning;

    fn state_with_platforms(ys: &[f32]) -> GameState {
        let mut s = GameState::new(3, Tuning::default());
        s.player.pos = Vec2::ZERO;
        s.platforms = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| Platform::new(Vec2::new(0.0, y), 8, i as u32 + 1))
            .collect();
        s
    }

    #[test]
    fn test_pickup_awards_points() {
        let mut s = GameState::new(3, Tuning::default());
        s.bonuses.push(Bonus {
            id: 9,
            pos: Vec2::new(50.0, 50.0),
            value: 500,
            hitbox: 20.0,
        });
        s.player.pos = Vec2::new(55.0, 53.0);
        let before = s.score.score();

        assert_eq!(collect_bonuses(&mut s), 500);
        assert_eq!(s.score.score(), before + 500);
        assert!(s.bonuses.is_empty());
        assert!(s.events.contains(&GameEvent::BonusCollected { id: 9, points: 500 }));

        // Already removed; nothing awarded twice
        assert_eq!(collect_bonuses(&mut s), 0);
    }

    #[test]
    fn test_out_of_reach_bonus_kept() {
        let mut s = GameState::new(3, Tuning::default());
        s.bonuses.push(Bonus {
            id: 1,
            pos: Vec2::new(100.0, 100.0),
            value: 500,
            hitbox: 20.0,
        });
        s.player.pos = Vec2::new(100.0, 120.0);
        assert_eq!(collect_bonuses(&mut s), 0);
        assert_eq!(s.bonuses.len(), 1);
    }

    #[test]
    fn test_two_bonuses_in_one_tick() {
        let mut s = GameState::new(3, Tuning::default());
        for id in [1, 2] {
            s.bonuses.push(Bonus {
                id,
                pos: Vec2::new(id as f32, 0.0),
                value: 500,
                hitbox: 20.0,
            });
        }
        s.player.pos = Vec2::ZERO;
        assert_eq!(collect_bonuses(&mut s), 1000);
        assert!(s.bonuses.is_empty());
    }

    #[test]
    fn test_eligibility_window() {
        // gap*1.5 = 150, half_height*1.5 = 600
        let s = state_with_platforms(&[100.0, 151.0, 400.0, 599.0, 650.0]);
        assert_eq!(eligible_platforms(&s), vec![1, 2, 3]);
    }

    #[test]
    fn test_platform_with_bonus_not_eligible() {
        let mut s = state_with_platforms(&[200.0, 300.0]);
        s.bonuses.push(Bonus {
            id: 1,
            pos: Vec2::new(30.0, 230.0),
            value: 500,
            hitbox: 20.0,
        });
        assert_eq!(eligible_platforms(&s), vec![1]);
    }

    #[test]
    fn test_force_spawn_places_above_platform() {
        let mut s = state_with_platforms(&[300.0]);
        let t = s.tuning.clone();

        let id = force_spawn_bonus(&mut s).unwrap();

        let bonus = &s.bonuses[0];
        let plat = &s.platforms[0];
        assert_eq!(bonus.id, id);
        assert_eq!(plat.bonus, Some(id));
        assert_eq!(bonus.pos.y, plat.top(&t) + t.bonus_lift);
        assert!((bonus.pos.x - plat.pos.x).abs() <= plat.length as f32 * t.bonus_offset_factor);
        // Platform now occupied
        assert!(force_spawn_bonus(&mut s).is_none());
    }

    #[test]
    fn test_spawn_rate_is_rare() {
        let mut s = state_with_platforms(&[300.0]);
        let mut spawned = 0;
        for _ in 0..3000 {
            if spawn_bonus(&mut s).is_some() {
                spawned += 1;
                s.bonuses.clear();
                s.platforms[0].bonus = None;
            }
        }
        // ~10 expected at 1/300
        assert!((1..40).contains(&spawned), "spawned {spawned}");
    }

    #[test]
    fn test_collect_unlinks_platform() {
        let mut s = state_with_platforms(&[300.0]);
        let id = force_spawn_bonus(&mut s).unwrap();
        s.player.pos = s.bonuses[0].pos;
        collect_bonuses(&mut s);
        assert_eq!(s.platforms[0].bonus, None);
        assert!(!s.bonuses.iter().any(|b| b.id == id));
    }
}
