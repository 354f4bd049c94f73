//! Vehicle kinematics shared by the player and traffic
//!
//! An actor is either cruising (locked to its lane center) or changing lane
//! (stepping sideways toward the target lane center at its class's rate).
//! Heading chases the lateral error so the car visibly leans into a change.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::decision::{EntityId, Neighbor, decide};
use super::lane::{Lane, Steer};
use super::road::Road;
use crate::approach;
use crate::error::LaneChangeRejected;
use crate::tuning::Tuning;

/// Who is driving; selects the per-class tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverClass {
    /// Player steering from input
    Manual,
    /// Player driven by the heuristic
    Assisted,
    /// AI traffic vehicle
    Traffic,
}

/// Lane-change state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Motion {
    #[default]
    Cruising,
    ChangingLane,
}

/// A box positioned in a lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub lane: Lane,
    /// Horizontal center
    pub x: f32,
    /// Top edge (longitudinal position)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Body {
    /// Box in `lane` with its top at `y`, centered on the lane
    pub fn in_lane(lane: Lane, y: f32, width: f32, height: f32, road: &Road) -> Self {
        let mut body = Self {
            lane,
            x: 0.0,
            y,
            width,
            height,
        };
        body.snap_to_lane(road);
        body
    }

    /// Row at which lane geometry is sampled for this body
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_center(self.x, self.y, self.width, self.height)
    }

    pub fn snap_to_lane(&mut self, road: &Road) {
        self.x = road.lane_center(self.center_y(), self.lane);
    }

    /// True if any corner lies outside the road edges at that corner's row
    pub fn is_off_road(&self, road: &Road) -> bool {
        self.bounds().corners().iter().any(|corner| {
            let (left, right) = road.edges(corner.y);
            corner.x < left || corner.x > right
        })
    }
}

/// A vehicle with lane-change kinematics
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub class: DriverClass,
    pub body: Body,
    target_lane: Lane,
    motion: Motion,
    /// Radians; positive leans toward lower x
    heading: f32,
    lane_cooldown: u32,
    decision_timer: u32,
}

impl Actor {
    pub fn new(class: DriverClass, lane: Lane, y: f32, width: f32, height: f32, road: &Road) -> Self {
        Self {
            class,
            body: Body::in_lane(lane, y, width, height, road),
            target_lane: lane,
            motion: Motion::Cruising,
            heading: 0.0,
            lane_cooldown: 0,
            decision_timer: 0,
        }
    }

    #[inline]
    pub fn lane(&self) -> Lane {
        self.body.lane
    }

    #[inline]
    pub fn target_lane(&self) -> Lane {
        self.target_lane
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    #[inline]
    pub fn is_changing_lane(&self) -> bool {
        self.motion == Motion::ChangingLane
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn lane_cooldown(&self) -> u32 {
        self.lane_cooldown
    }

    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }

    pub fn is_off_road(&self, road: &Road) -> bool {
        self.body.is_off_road(road)
    }

    /// This actor as seen by other drivers' heuristics
    pub fn neighbor(&self, id: EntityId) -> Neighbor {
        Neighbor {
            id,
            lane: self.body.lane,
            y: self.body.y,
        }
    }

    /// Count down the lane-change cooldown and the decision timer
    pub fn tick_cooldowns(&mut self) {
        self.lane_cooldown = self.lane_cooldown.saturating_sub(1);
        self.decision_timer = self.decision_timer.saturating_sub(1);
    }

    /// Start a change to the adjacent lane, arming `cooldown`
    pub fn request_lane_change(
        &mut self,
        steer: Steer,
        cooldown: u32,
    ) -> Result<Lane, LaneChangeRejected> {
        if self.is_changing_lane() {
            return Err(LaneChangeRejected::AlreadyChanging {
                target: self.target_lane,
            });
        }
        if self.lane_cooldown > 0 {
            return Err(LaneChangeRejected::CoolingDown {
                remaining: self.lane_cooldown,
            });
        }
        let target = self
            .body
            .lane
            .offset(steer)
            .ok_or(LaneChangeRejected::OutOfRange {
                from: self.body.lane,
                steer,
            })?;

        self.target_lane = target;
        self.motion = Motion::ChangingLane;
        self.lane_cooldown = cooldown;
        Ok(target)
    }

    /// Consult the heuristic when the decision timer has run out. Returns the
    /// lane a newly started change is heading for.
    pub fn pilot<R: Rng + ?Sized>(
        &mut self,
        me: EntityId,
        neighbors: &[Neighbor],
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<Lane> {
        let ai = tuning.ai(self.class)?;
        if self.decision_timer > 0 || self.is_changing_lane() {
            return None;
        }
        self.decision_timer = ai.decision_interval;

        let others = neighbors.iter().filter(|n| n.id != me);
        let steer = decide(self, others, ai.look_ahead, rng)?;
        let cooldown = tuning.driver(self.class).lane_cooldown;
        match self.request_lane_change(steer, cooldown) {
            Ok(target) => {
                log::trace!("{me:?} steering {steer:?} toward {target:?}");
                Some(target)
            }
            Err(reason) => {
                log::debug!("{me:?} dropped AI decision: {reason}");
                None
            }
        }
    }

    /// Advance lateral position and heading by one tick
    pub fn step(&mut self, road: &Road, tuning: &Tuning) {
        let centers = road.lane_positions(self.body.center_y());

        match self.motion {
            Motion::Cruising => {
                self.body.x = centers[self.body.lane.index()];
            }
            Motion::ChangingLane => {
                let lane_step = tuning.driver(self.class).lane_step;
                let target_x = centers[self.target_lane.index()];
                if (target_x - self.body.x).abs() < lane_step {
                    self.body.x = target_x;
                    self.body.lane = self.target_lane;
                    self.motion = Motion::Cruising;
                } else {
                    self.body.x = approach(self.body.x, target_x, lane_step);
                }
            }
        }

        let error = centers[self.target_lane.index()] - self.body.x;
        let max = tuning.max_heading;
        let target_heading = (-(error / road.road_width()) * max).clamp(-max, max);
        self.heading = approach(self.heading, target_heading, tuning.rotation_rate);
    }
}
