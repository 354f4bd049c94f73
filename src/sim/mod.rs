//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - One seeded RNG per session
//! - Start-of-tick snapshots for every cross-entity read
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod curve;
pub mod decision;
pub mod lane;
pub mod obstacle;
pub mod road;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use actor::{Actor, Body, DriverClass, Motion};
pub use collision::Aabb;
pub use curve::{CurveField, CurveSegment, NoisePoint, Waveform};
pub use decision::{EntityId, Neighbor, decide};
pub use lane::{LANE_COUNT, Lane, Steer};
pub use obstacle::{Obstacle, ObstacleClass, ObstacleKind, ObstacleManager};
pub use road::Road;
pub use snapshot::{ActorView, ObstacleView, PlayerView, Snapshot};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
