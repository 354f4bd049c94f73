//! Lane-selection heuristic for AI drivers
//!
//! Pure function of the actor, the start-of-tick neighbor snapshot and a
//! random source (used only for the idle drift back to the middle lane).
//! Callers rate-limit it with the actor's decision timer.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::lane::{LANE_COUNT, Lane, Steer};

/// Obstacles further behind than this are ignored
pub const REAR_WINDOW: f32 = 50.0;
/// A same-lane threat this close forces an escape to an adjacent lane
pub const IMMEDIATE_DANGER: f32 = 100.0;
/// A same-lane threat this close allows an opportunistic switch
pub const MEDIUM_DANGER: f32 = 200.0;
/// Minimum score for an escape lane
pub const ESCAPE_THRESHOLD: f32 = 50.0;
/// Required advantage over the current lane for an opportunistic switch
pub const SWITCH_MARGIN: f32 = 30.0;
pub const CURRENT_LANE_BONUS: f32 = 20.0;
pub const BASE_SCORE: f32 = 100.0;
pub const DRIFT_TO_MIDDLE_CHANCE: f64 = 0.01;

/// Identifies a participant in the neighbor snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    Player,
    Obstacle(u32),
}

/// Start-of-tick position of one participant as other drivers see it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: EntityId,
    pub lane: Lane,
    pub y: f32,
}

/// Pick a single-lane step for `actor`, or `None` to stay put.
///
/// Distances are `neighbor.y - actor.y`; only neighbors within one lane and
/// inside `(-REAR_WINDOW, look_ahead)` are considered. Since y grows down the
/// screen, "ahead" means below the actor: obstacles still falling toward it
/// sit in the rear window.
pub fn decide<'a, R, I>(actor: &Actor, neighbors: I, look_ahead: f32, rng: &mut R) -> Option<Steer>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Neighbor>,
{
    let lane = actor.lane();
    let mut nearby: Vec<(Lane, f32)> = neighbors
        .into_iter()
        .map(|n| (n.lane, n.y - actor.body.y))
        .filter(|&(other, distance)| {
            distance > -REAR_WINDOW && distance < look_ahead && other.distance(lane) <= 1
        })
        .collect();
    nearby.sort_by(|a, b| a.1.abs().total_cmp(&b.1.abs()));

    if nearby.is_empty() {
        if lane != Lane::Middle
            && !actor.is_changing_lane()
            && rng.random_bool(DRIFT_TO_MIDDLE_CHANCE)
        {
            return lane.steer_toward(Lane::Middle);
        }
        return None;
    }

    // Sorted by |distance|, so the first forward hit is the nearest one
    let nearest = nearby
        .iter()
        .find(|&&(other, distance)| other == lane && distance > 0.0)?
        .1;

    let scores = lane_scores(lane, &nearby);

    if nearest < IMMEDIATE_DANGER {
        let mut best: Option<(Steer, f32)> = None;
        for steer in [Steer::Left, Steer::Right] {
            let Some(next) = lane.offset(steer) else {
                continue;
            };
            let score = scores[next.index()];
            if score > ESCAPE_THRESHOLD && best.is_none_or(|(_, top)| score > top) {
                best = Some((steer, score));
            }
        }
        return best.map(|(steer, _)| steer);
    }

    if nearest < MEDIUM_DANGER {
        let mut best = lane;
        for candidate in Lane::ALL.into_iter().filter(|c| c.distance(lane) <= 1) {
            if scores[candidate.index()] > scores[best.index()] {
                best = candidate;
            }
        }
        if scores[best.index()] > scores[lane.index()] + SWITCH_MARGIN {
            return lane.steer_toward(best);
        }
    }

    None
}

fn lane_scores(lane: Lane, nearby: &[(Lane, f32)]) -> [f32; LANE_COUNT] {
    let mut scores = [BASE_SCORE; LANE_COUNT];
    for &(other, distance) in nearby {
        let penalty = if distance > 0.0 {
            100.0 / (distance / 50.0)
        } else {
            50.0 / (distance.abs() / 50.0)
        };
        scores[other.index()] -= penalty;
    }
    scores[lane.index()] += CURRENT_LANE_BONUS;
    scores
}
