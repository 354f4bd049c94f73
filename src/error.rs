//! Error types
//!
//! Configuration problems are fatal at session start. Lane-change rejections
//! are advisory: callers log and drop them.

use thiserror::Error;

use crate::sim::{Lane, Steer};

/// Errors raised when tunables violate their invariants.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} range is inverted (min {min} > max {max})")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field} must be a probability in [0, 1] (got {value})")]
    Probability { field: &'static str, value: f32 },
    #[error("three lanes of width {lane_width} do not fit a road of width {road_width}")]
    LanesExceedRoad { lane_width: f32, road_width: f32 },
    #[error("traffic with speed factor {factor} never moves down the road (travel {travel} per tick)")]
    TrafficStalled { factor: f32, travel: f32 },
    #[error("obstacle spawn weights must not all be zero")]
    NoSpawnWeight,
    #[error("curve needs at least one segment and one noise point")]
    EmptyCurve,
    #[error("malformed tuning document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Why an actor refused a lane-change request.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LaneChangeRejected {
    #[error("cannot steer {steer:?} out of the {from:?} lane")]
    OutOfRange { from: Lane, steer: Steer },
    #[error("lane change cooling down ({remaining} ticks left)")]
    CoolingDown { remaining: u32 },
    #[error("already changing lane toward {target:?}")]
    AlreadyChanging { target: Lane },
}
