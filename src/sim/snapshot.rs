//! Read-only views handed to the renderer
//!
//! Built fresh from the state after each tick; nothing here feeds back into
//! the simulation.

use serde::Serialize;

use super::actor::Actor;
use super::collision::Aabb;
use super::lane::Lane;
use super::obstacle::ObstacleClass;
use super::road::Road;
use super::state::GamePhase;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub bounds: Aabb,
    pub lane: Lane,
    pub target_lane: Lane,
    pub heading: f32,
    pub changing_lane: bool,
    pub off_road: bool,
}

impl ActorView {
    pub fn of(actor: &Actor, road: &Road) -> Self {
        Self {
            bounds: actor.bounds(),
            lane: actor.lane(),
            target_lane: actor.target_lane(),
            heading: actor.heading(),
            changing_lane: actor.is_changing_lane(),
            off_road: actor.is_off_road(road),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    #[serde(flatten)]
    pub actor: ActorView,
    pub ai_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub class: ObstacleClass,
    pub bounds: Aabb,
    pub lane: Lane,
    pub target_lane: Lane,
    pub heading: f32,
    /// Debris rotation in degrees, zero for other kinds
    pub spin: f32,
    pub off_road: bool,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub collided: bool,
    pub distance: f64,
    pub score: u64,
    pub high_score: u64,
    pub scroll_offset: f64,
    pub auto_scroll: bool,
}
