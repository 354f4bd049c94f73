//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. Every update
//! in a tick reads the same start-of-tick neighbor snapshot.

use super::actor::DriverClass;
use super::decision::{EntityId, Neighbor};
use super::lane::Steer;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Lane change request, honored only while driving manually
    pub steer: Option<Steer>,
    /// Switch between manual and AI-assisted driving
    pub toggle_ai: bool,
    /// Pause or resume road scrolling
    pub toggle_scroll: bool,
    /// Start a new round
    pub reset: bool,
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.reset {
        state.reset();
        return;
    }

    if state.phase == GamePhase::GameOver {
        return;
    }

    if input.toggle_ai {
        state.toggle_ai();
    }
    if input.toggle_scroll {
        state.auto_scroll = !state.auto_scroll;
        log::info!("Auto-scroll {}", if state.auto_scroll { "on" } else { "off" });
    }

    let neighbors = state.neighbors();

    update_player(state, input.steer, &neighbors);

    if state.auto_scroll {
        advance_clock(state);
    }

    state
        .obstacles
        .update(&state.road, &neighbors, &state.tuning, &mut state.rng);

    state.time_ticks += 1;

    if let Some(id) = state.obstacles.first_hit(&state.player) {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {}: hit obstacle #{id}, score {} (best {})",
            state.time_ticks,
            state.score,
            state.high_score
        );
    }
}

fn update_player(state: &mut GameState, steer: Option<Steer>, neighbors: &[Neighbor]) {
    let GameState {
        player,
        road,
        tuning,
        rng,
        ..
    } = state;

    player.tick_cooldowns();
    match player.class {
        DriverClass::Manual => {
            if let Some(steer) = steer {
                let cooldown = tuning.driver(DriverClass::Manual).lane_cooldown;
                if let Err(reason) = player.request_lane_change(steer, cooldown) {
                    log::debug!("Lane change ignored: {reason}");
                }
            }
        }
        _ => {
            player.pilot(EntityId::Player, neighbors, tuning, rng);
        }
    }
    player.step(road, tuning);
}

/// Scroll the road and bump distance, score and high score
fn advance_clock(state: &mut GameState) {
    let step = state.tuning.scroll_speed;
    state.road.scroll(step);
    state.distance += step as f64;
    state.score = (state.distance / 10.0) as u64;
    state.high_score = state.high_score.max(state.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::lane::Lane;
    use crate::sim::obstacle::ObstacleClass;
    use crate::sim::road::Road;
    use crate::tuning::Tuning;

    fn manual_state(seed: u64) -> GameState {
        let tuning = Tuning {
            start_in_ai_mode: false,
            ..Tuning::default()
        };
        GameState::new(seed, tuning).unwrap()
    }

    fn scripted_input(t: u32) -> TickInput {
        TickInput {
            steer: match t % 90 {
                10 => Some(Steer::Left),
                55 => Some(Steer::Right),
                _ => None,
            },
            toggle_ai: t == 300 || t == 900,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_determinism() {
        let mut a = GameState::new(2024, Tuning::default()).unwrap();
        let mut b = GameState::new(2024, Tuning::default()).unwrap();
        for t in 0..2000 {
            let input = scripted_input(t);
            tick(&mut a, &input);
            tick(&mut b, &input);
            if t % 100 == 0 {
                assert_eq!(a.snapshot(), b.snapshot(), "diverged at tick {t}");
            }
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_score_tracks_distance() {
        let mut state = GameState::new(5, Tuning::default()).unwrap();
        for _ in 0..7 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.time_ticks, 7);
        assert_eq!(state.distance, 35.0);
        assert_eq!(state.score, 3);
        assert_eq!(state.high_score, 3);
        assert_eq!(state.road.scroll_offset(), -35.0);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut state = GameState::new(8, Tuning::default()).unwrap();
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 50);
        let old_seed = state.seed;

        tick(
            &mut state,
            &TickInput {
                reset: true,
                ..Default::default()
            },
        );
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.high_score, 50);
        assert_ne!(state.seed, old_seed);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_collision_ends_round() {
        let mut state = manual_state(11);
        state.road = Road::straight(&state.tuning);
        // Barrier spans 468..508; the player starts at 510
        state.place_obstacle(ObstacleClass::Barrier, Lane::Middle, 468.0);
        assert!(!state.obstacles.check_collision(&state.player));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.collided());
        assert!(state.snapshot().collided);

        // Frozen until reset
        let frozen = state.snapshot();
        tick(
            &mut state,
            &TickInput {
                steer: Some(Steer::Left),
                toggle_ai: true,
                toggle_scroll: true,
                ..Default::default()
            },
        );
        assert_eq!(state.snapshot(), frozen);

        tick(
            &mut state,
            &TickInput {
                reset: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_adjacent_lane_obstacle_is_a_near_miss() {
        let mut state = manual_state(11);
        state.road = Road::straight(&state.tuning);
        state.place_obstacle(ObstacleClass::Traffic, Lane::Left, 468.0);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_manual_steer() {
        let mut state = manual_state(3);
        state.road = Road::straight(&state.tuning);
        let left = TickInput {
            steer: Some(Steer::Left),
            ..Default::default()
        };
        tick(&mut state, &left);
        assert!(state.player.is_changing_lane());
        assert_eq!(state.player.target_lane(), Lane::Left);

        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.lane(), Lane::Left);
        assert_eq!(state.player.body.x, 300.0);
        assert!(!state.player.is_changing_lane());

        // Already in the leftmost lane: request is dropped
        tick(&mut state, &left);
        assert_eq!(state.player.lane(), Lane::Left);
        assert!(!state.player.is_changing_lane());
    }

    #[test]
    fn test_steer_ignored_while_assisted() {
        let mut state = GameState::new(3, Tuning::default()).unwrap();
        assert!(state.ai_enabled());
        tick(
            &mut state,
            &TickInput {
                steer: Some(Steer::Right),
                ..Default::default()
            },
        );
        assert!(!state.player.is_changing_lane());
        assert_eq!(state.player.lane(), Lane::Middle);
    }

    #[test]
    fn test_assisted_player_reacts_to_threat() {
        let mut state = GameState::new(3, Tuning::default()).unwrap();
        // Positive distance (below the player) is what the heuristic treats
        // as ahead
        let y = state.player.body.y + 80.0;
        state.place_obstacle(ObstacleClass::Barrier, Lane::Middle, y);

        tick(&mut state, &TickInput::default());
        assert!(state.player.is_changing_lane());
        assert_eq!(state.player.target_lane(), Lane::Left);
        assert!(!state.collided());
    }

    #[test]
    fn test_toggle_ai_input() {
        let mut state = GameState::new(3, Tuning::default()).unwrap();
        let toggle = TickInput {
            toggle_ai: true,
            ..Default::default()
        };
        tick(&mut state, &toggle);
        assert!(!state.ai_enabled());
        assert!(!state.snapshot().player.ai_enabled);
        tick(&mut state, &toggle);
        assert!(state.ai_enabled());
    }

    #[test]
    fn test_scroll_toggle_pauses_road_only() {
        let mut state = manual_state(4);
        let id = state.place_obstacle(ObstacleClass::Debris, Lane::Right, 0.0);
        tick(
            &mut state,
            &TickInput {
                toggle_scroll: true,
                ..Default::default()
            },
        );
        assert!(!state.auto_scroll);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.road.scroll_offset(), 0.0);
        assert_eq!(state.obstacles.get(id).unwrap().body().y, 5.0);
        assert_eq!(state.time_ticks, 1);

        tick(
            &mut state,
            &TickInput {
                toggle_scroll: true,
                ..Default::default()
            },
        );
        assert!(state.auto_scroll);
        assert_eq!(state.distance, 5.0);
    }
}
