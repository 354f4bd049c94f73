//! Game state and session lifecycle
//!
//! Everything a session needs lives here: the road, the player, the obstacle
//! set, counters and the one seeded RNG every random draw comes from.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, DriverClass};
use super::decision::{EntityId, Neighbor};
use super::lane::Lane;
use super::obstacle::{ObstacleClass, ObstacleManager};
use super::road::Road;
use super::snapshot::{ActorView, PlayerView, Snapshot};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Road scrolling, player driving
    Running,
    /// The player hit an obstacle; only a reset leaves this phase
    GameOver,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this round was generated from
    pub seed: u64,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub road: Road,
    pub player: Actor,
    pub obstacles: ObstacleManager,
    pub phase: GamePhase,
    /// Road scrolling; obstacles keep moving while paused
    pub auto_scroll: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Total scrolled distance this round
    pub distance: f64,
    pub score: u64,
    /// Best score this session, kept across resets
    pub high_score: u64,
}

impl GameState {
    /// Validate `tuning` and build a fresh round from `seed`
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let obstacles = ObstacleManager::new(&tuning)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let road = Road::generate(&tuning, &mut rng);
        let player = spawn_player(&tuning, &road);

        log::info!(
            "Session seed {seed:#x}: {} curve segments over {:.0} units",
            road.curve().segments().len(),
            road.curve().total_length()
        );

        Ok(Self {
            seed,
            tuning,
            rng,
            road,
            player,
            obstacles,
            phase: GamePhase::Running,
            auto_scroll: true,
            time_ticks: 0,
            distance: 0.0,
            score: 0,
            high_score: 0,
        })
    }

    /// Start a new round from a seed drawn from the session RNG
    pub fn reset(&mut self) {
        let seed = self.rng.random::<u64>();
        self.reset_with_seed(seed);
    }

    /// Replace road, player, obstacles and counters in one step. The tuning
    /// was validated when the session was created and the high score carries
    /// over.
    pub fn reset_with_seed(&mut self, seed: u64) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let road = Road::generate(&self.tuning, &mut rng);
        let player = spawn_player(&self.tuning, &road);

        self.seed = seed;
        self.rng = rng;
        self.road = road;
        self.player = player;
        self.obstacles.reset();
        self.phase = GamePhase::Running;
        self.auto_scroll = true;
        self.time_ticks = 0;
        self.distance = 0.0;
        self.score = 0;

        log::info!("Round reset with seed {seed:#x} (high score {})", self.high_score);
    }

    #[inline]
    pub fn ai_enabled(&self) -> bool {
        self.player.class == DriverClass::Assisted
    }

    /// Switch the player between manual and assisted driving
    pub fn toggle_ai(&mut self) {
        self.player.class = match self.player.class {
            DriverClass::Manual => DriverClass::Assisted,
            _ => DriverClass::Manual,
        };
        log::info!("AI driving {}", if self.ai_enabled() { "on" } else { "off" });
    }

    #[inline]
    pub fn collided(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Start-of-tick positions of the player and every obstacle
    pub fn neighbors(&self) -> Vec<Neighbor> {
        std::iter::once(self.player.neighbor(EntityId::Player))
            .chain(self.obstacles.neighbors())
            .collect()
    }

    /// Insert a specific obstacle into the round
    pub fn place_obstacle(&mut self, class: ObstacleClass, lane: Lane, y: f32) -> u32 {
        self.obstacles
            .place(class, lane, y, &self.road, &self.tuning, &mut self.rng)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            player: PlayerView {
                actor: ActorView::of(&self.player, &self.road),
                ai_enabled: self.ai_enabled(),
            },
            obstacles: self
                .obstacles
                .obstacles()
                .iter()
                .map(|o| o.view(&self.road))
                .collect(),
            collided: self.collided(),
            distance: self.distance,
            score: self.score,
            high_score: self.high_score,
            scroll_offset: self.road.scroll_offset(),
            auto_scroll: self.auto_scroll,
        }
    }
}

fn spawn_player(tuning: &Tuning, road: &Road) -> Actor {
    let class = if tuning.start_in_ai_mode {
        DriverClass::Assisted
    } else {
        DriverClass::Manual
    };
    Actor::new(
        class,
        Lane::Middle,
        tuning.player_y(),
        tuning.car_width,
        tuning.car_height,
        road,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::SpawnWeights;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(12345, Tuning::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.ai_enabled());
        assert!(state.auto_scroll);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.lane(), Lane::Middle);
        assert_eq!(state.player.body.y, 510.0);
        let center = state
            .road
            .lane_center(state.player.body.center_y(), Lane::Middle);
        assert_eq!(state.player.body.x, center);
    }

    #[test]
    fn test_manual_start() {
        let tuning = Tuning {
            start_in_ai_mode: false,
            ..Tuning::default()
        };
        let state = GameState::new(1, tuning).unwrap();
        assert!(!state.ai_enabled());
        assert_eq!(state.player.class, DriverClass::Manual);
    }

    #[test]
    fn test_invalid_tuning_is_fatal() {
        let tuning = Tuning {
            lane_width: 0.0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::new(1, tuning),
            Err(ConfigError::NonPositive { field: "lane_width", .. })
        ));
    }

    #[test]
    fn test_traffic_that_never_leaves_is_fatal() {
        let tuning = Tuning {
            traffic_speed_factor: -1.5,
            spawn_weights: SpawnWeights {
                traffic: 1,
                debris: 0,
                barrier: 0,
            },
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::new(1, tuning),
            Err(ConfigError::TrafficStalled { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_road() {
        let a = GameState::new(99, Tuning::default()).unwrap();
        let b = GameState::new(99, Tuning::default()).unwrap();
        let c = GameState::new(100, Tuning::default()).unwrap();
        assert_eq!(a.road.curve(), b.road.curve());
        assert_ne!(a.road.curve(), c.road.curve());
    }

    #[test]
    fn test_reset_with_seed_matches_fresh_state() {
        let mut state = GameState::new(7, Tuning::default()).unwrap();
        state.place_obstacle(ObstacleClass::Barrier, Lane::Left, 0.0);
        state.distance = 5000.0;
        state.score = 500;
        state.high_score = 500;
        state.phase = GamePhase::GameOver;
        state.toggle_ai();

        state.reset_with_seed(42);
        let fresh = GameState::new(42, Tuning::default()).unwrap();
        assert_eq!(state.high_score, 500);
        assert_eq!(state.seed, 42);
        assert_eq!(state.road.curve(), fresh.road.curve());
        assert_eq!(state.player, fresh.player);

        let mut expected = fresh.snapshot();
        expected.high_score = 500;
        assert_eq!(state.snapshot(), expected);
    }

    #[test]
    fn test_toggle_ai_round_trip() {
        let mut state = GameState::new(3, Tuning::default()).unwrap();
        state.toggle_ai();
        assert_eq!(state.player.class, DriverClass::Manual);
        state.toggle_ai();
        assert_eq!(state.player.class, DriverClass::Assisted);
    }

    #[test]
    fn test_neighbors_include_player_first() {
        let mut state = GameState::new(3, Tuning::default()).unwrap();
        let id = state.place_obstacle(ObstacleClass::Debris, Lane::Right, 100.0);
        let neighbors = state.neighbors();
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0].id, EntityId::Player);
        assert_eq!(neighbors[1].id, EntityId::Obstacle(id));
        assert_eq!(neighbors[1].lane, Lane::Right);
        assert_eq!(neighbors[1].y, 100.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(3, Tuning::default()).unwrap();
        state.place_obstacle(ObstacleClass::Traffic, Lane::Left, 0.0);
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["phase"], "Running");
        assert_eq!(json["player"]["ai_enabled"], true);
        assert_eq!(json["player"]["lane"], "Middle");
        assert_eq!(json["obstacles"][0]["class"], "Traffic");
        assert_eq!(json["collided"], false);
    }
}
