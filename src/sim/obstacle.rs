//! Obstacle population: spawning, per-tick updates, culling, collision
//!
//! Traffic vehicles wrap a full [`Actor`] and drive themselves with the
//! decision heuristic. Debris and barriers just ride their lane down the
//! screen.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Body, DriverClass};
use super::collision::Aabb;
use super::decision::{EntityId, Neighbor};
use super::lane::{LANE_COUNT, Lane};
use super::road::Road;
use super::snapshot::ObstacleView;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Obstacle kind without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleClass {
    Traffic,
    Debris,
    Barrier,
}

impl ObstacleClass {
    /// Order matches the spawn weight table
    pub const ALL: [ObstacleClass; 3] = [
        ObstacleClass::Traffic,
        ObstacleClass::Debris,
        ObstacleClass::Barrier,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObstacleKind {
    Traffic(Actor),
    Debris { body: Body, spin: f32 },
    Barrier { body: Body },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Added to the scroll speed each tick
    pub speed: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        class: ObstacleClass,
        lane: Lane,
        y: f32,
        road: &Road,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let (speed, kind) = match class {
            ObstacleClass::Traffic => (
                tuning.traffic_speed_factor * tuning.scroll_speed,
                ObstacleKind::Traffic(Actor::new(
                    DriverClass::Traffic,
                    lane,
                    y,
                    tuning.car_width,
                    tuning.car_height,
                    road,
                )),
            ),
            ObstacleClass::Debris => (
                0.0,
                ObstacleKind::Debris {
                    body: Body::in_lane(lane, y, tuning.debris_size, tuning.debris_size, road),
                    spin: rng.random_range(0.0..360.0),
                },
            ),
            ObstacleClass::Barrier => (
                0.0,
                ObstacleKind::Barrier {
                    body: Body::in_lane(
                        lane,
                        y,
                        tuning.barrier_width_factor * tuning.lane_width,
                        tuning.barrier_height,
                        road,
                    ),
                },
            ),
        };
        Self { id, speed, kind }
    }

    pub fn class(&self) -> ObstacleClass {
        match self.kind {
            ObstacleKind::Traffic(_) => ObstacleClass::Traffic,
            ObstacleKind::Debris { .. } => ObstacleClass::Debris,
            ObstacleKind::Barrier { .. } => ObstacleClass::Barrier,
        }
    }

    pub fn body(&self) -> &Body {
        match &self.kind {
            ObstacleKind::Traffic(actor) => &actor.body,
            ObstacleKind::Debris { body, .. } | ObstacleKind::Barrier { body } => body,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.body().bounds()
    }

    pub fn neighbor(&self) -> Neighbor {
        let body = self.body();
        Neighbor {
            id: EntityId::Obstacle(self.id),
            lane: body.lane,
            y: body.y,
        }
    }

    pub fn view(&self, road: &Road) -> ObstacleView {
        let body = self.body();
        let (target_lane, heading, spin) = match &self.kind {
            ObstacleKind::Traffic(actor) => (actor.target_lane(), actor.heading(), 0.0),
            ObstacleKind::Debris { spin, .. } => (body.lane, 0.0, *spin),
            ObstacleKind::Barrier { .. } => (body.lane, 0.0, 0.0),
        };
        ObstacleView {
            id: self.id,
            class: self.class(),
            bounds: body.bounds(),
            lane: body.lane,
            target_lane,
            heading,
            spin,
            off_road: body.is_off_road(road),
        }
    }

    /// Move one tick. `neighbors` is the start-of-tick snapshot.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        road: &Road,
        neighbors: &[Neighbor],
        tuning: &Tuning,
        rng: &mut R,
    ) {
        let travel = tuning.scroll_speed + self.speed;
        let me = EntityId::Obstacle(self.id);
        match &mut self.kind {
            ObstacleKind::Traffic(actor) => {
                actor.tick_cooldowns();
                actor.pilot(me, neighbors, tuning, rng);
                actor.body.y += travel;
                actor.step(road, tuning);
            }
            ObstacleKind::Debris { body, .. } | ObstacleKind::Barrier { body } => {
                body.y += travel;
                body.snap_to_lane(road);
            }
        }
    }
}

/// Owns the live obstacle set
#[derive(Debug, Clone)]
pub struct ObstacleManager {
    obstacles: Vec<Obstacle>,
    spawn_timer: u32,
    next_id: u32,
    kind_weights: WeightedIndex<u32>,
}

impl ObstacleManager {
    pub fn new(tuning: &Tuning) -> Result<Self, ConfigError> {
        let weights = &tuning.spawn_weights;
        let kind_weights = WeightedIndex::new([weights.traffic, weights.debris, weights.barrier])
            .map_err(|_| ConfigError::NoSpawnWeight)?;
        Ok(Self {
            obstacles: Vec::new(),
            spawn_timer: 0,
            next_id: 0,
            kind_weights,
        })
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    /// Drop every obstacle and restart the spawn timer and id sequence
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0;
        self.next_id = 0;
    }

    pub fn neighbors(&self) -> impl Iterator<Item = Neighbor> + '_ {
        self.obstacles.iter().map(Obstacle::neighbor)
    }

    /// Insert a specific obstacle, returning its id
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        class: ObstacleClass,
        lane: Lane,
        y: f32,
        road: &Road,
        tuning: &Tuning,
        rng: &mut R,
    ) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.obstacles
            .push(Obstacle::new(id, class, lane, y, road, tuning, rng));
        log::debug!("spawned {class:?} #{id} in {lane:?} at y={y}");
        id
    }

    /// Spawn a random obstacle at the spawn line. Traffic is refused while
    /// another traffic vehicle is still close to the spawn line.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        road: &Road,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<u32> {
        let lane = Lane::ALL[rng.random_range(0..LANE_COUNT)];
        let class = ObstacleClass::ALL[self.kind_weights.sample(rng)];

        if class == ObstacleClass::Traffic {
            let clearance = tuning.spawn_spacing * tuning.car_height;
            let crowded = self.obstacles.iter().any(|o| {
                o.class() == ObstacleClass::Traffic && (o.body().y - tuning.spawn_y).abs() < clearance
            });
            if crowded {
                log::trace!("traffic spawn skipped: spawn line occupied");
                return None;
            }
        }

        Some(self.place(class, lane, tuning.spawn_y, road, tuning, rng))
    }

    /// Advance every obstacle, cull those past the bottom, then run the spawn
    /// timer. `neighbors` must be taken before any update this tick.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        road: &Road,
        neighbors: &[Neighbor],
        tuning: &Tuning,
        rng: &mut R,
    ) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(road, neighbors, tuning, rng);
        }

        let cull_line = tuning.cull_line();
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.body().y <= cull_line);
        let culled = before - self.obstacles.len();
        if culled > 0 {
            log::trace!("culled {culled} obstacle(s)");
        }

        self.spawn_timer += 1;
        if self.spawn_timer >= tuning.spawn_delay {
            self.spawn_timer = 0;
            self.spawn(road, tuning, rng);
        }
    }

    /// Id of the first obstacle overlapping `actor`
    pub fn first_hit(&self, actor: &Actor) -> Option<u32> {
        let bounds = actor.bounds();
        self.obstacles
            .iter()
            .find(|o| o.bounds().intersects(&bounds))
            .map(|o| o.id)
    }

    pub fn check_collision(&self, actor: &Actor) -> bool {
        self.first_hit(actor).is_some()
    }
}
