//! Data-driven game balance
//!
//! Every number the simulation depends on lives here. Documents may be
//! partial: missing fields fall back to the defaults in `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::DriverClass;

/// Lane-change behaviour for one class of driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverProfile {
    /// Lateral distance covered per tick while changing lane
    pub lane_step: f32,
    /// Ticks before another lane change may start
    pub lane_cooldown: u32,
}

/// Decision cadence for AI-driven classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    /// Ticks between heuristic consultations
    pub decision_interval: u32,
    /// How far ahead obstacles are considered
    pub look_ahead: f32,
}

/// Relative spawn weights per obstacle kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnWeights {
    pub traffic: u32,
    pub debris: u32,
    pub barrier: u32,
}

impl Default for SpawnWeights {
    fn default() -> Self {
        Self {
            traffic: 60,
            debris: 30,
            barrier: 10,
        }
    }
}

/// Inclusive `[min, max]` multiplier range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// All named tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub visible_height: f32,
    pub cull_margin: f32,
    pub spawn_y: f32,
    pub player_bottom_margin: f32,

    // === Road ===
    pub base_center: f32,
    pub lane_width: f32,
    pub road_width: f32,
    pub scroll_speed: f32,

    // === Curves ===
    pub segment_count: u32,
    pub noise_point_count: u32,
    /// Reference amplitude; segment and noise ranges scale from it
    pub curve_amplitude: f32,
    /// Reference wavelength
    pub curve_wavelength: f32,
    /// Chance a segment is straight
    pub straight_chance: f32,
    /// Segment amplitude as a fraction of `curve_amplitude`
    pub amplitude_range: Range,
    /// Segment wavelength as a fraction of `curve_wavelength`
    pub wavelength_range: Range,
    /// Segment length as a fraction of its own wavelength
    pub segment_length_range: Range,
    /// Noise offsets span `±noise_span * curve_amplitude`
    pub noise_span: f32,
    /// Weight of the noise term in the lateral offset
    pub noise_weight: f32,

    // === Vehicles ===
    pub car_width: f32,
    pub car_height: f32,
    pub rotation_rate: f32,
    pub max_heading: f32,
    pub manual: DriverProfile,
    pub assisted: DriverProfile,
    pub traffic: DriverProfile,
    pub assisted_ai: AiProfile,
    pub traffic_ai: AiProfile,
    /// Whether a fresh session starts with the AI driving the player
    pub start_in_ai_mode: bool,

    // === Obstacles ===
    pub spawn_delay: u32,
    pub spawn_weights: SpawnWeights,
    /// Traffic extra speed as a multiple of `scroll_speed`
    pub traffic_speed_factor: f32,
    /// Traffic spawns need this many car heights of clearance
    pub spawn_spacing: f32,
    pub debris_size: f32,
    /// Barrier width as a fraction of lane width
    pub barrier_width_factor: f32,
    pub barrier_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            visible_height: VISIBLE_HEIGHT,
            cull_margin: CULL_MARGIN,
            spawn_y: SPAWN_Y,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,

            base_center: BASE_ROAD_CENTER,
            lane_width: LANE_WIDTH,
            road_width: ROAD_WIDTH,
            scroll_speed: SCROLL_SPEED,

            segment_count: ROAD_SEGMENTS,
            noise_point_count: NOISE_POINTS,
            curve_amplitude: CURVE_AMPLITUDE,
            curve_wavelength: CURVE_WAVELENGTH,
            straight_chance: 0.2,
            amplitude_range: Range::new(0.2, 0.8),
            wavelength_range: Range::new(0.8, 1.2),
            segment_length_range: Range::new(0.7, 1.3),
            noise_span: 0.7,
            noise_weight: 0.3,

            car_width: CAR_WIDTH,
            car_height: CAR_HEIGHT,
            rotation_rate: ROTATION_RATE,
            max_heading: MAX_HEADING,
            manual: DriverProfile {
                lane_step: 6.0,
                lane_cooldown: 20,
            },
            assisted: DriverProfile {
                lane_step: 9.0,
                lane_cooldown: 10,
            },
            traffic: DriverProfile {
                lane_step: 3.0,
                lane_cooldown: 20,
            },
            assisted_ai: AiProfile {
                decision_interval: 5,
                look_ahead: 400.0,
            },
            traffic_ai: AiProfile {
                decision_interval: 15,
                look_ahead: 200.0,
            },
            start_in_ai_mode: true,

            spawn_delay: SPAWN_DELAY,
            spawn_weights: SpawnWeights::default(),
            traffic_speed_factor: -0.5,
            spawn_spacing: 2.0,
            debris_size: 30.0,
            barrier_width_factor: 0.8,
            barrier_height: 40.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Lane-change profile for a driver class
    pub fn driver(&self, class: DriverClass) -> &DriverProfile {
        match class {
            DriverClass::Manual => &self.manual,
            DriverClass::Assisted => &self.assisted,
            DriverClass::Traffic => &self.traffic,
        }
    }

    /// Decision cadence for a driver class (`None` for the manual player)
    pub fn ai(&self, class: DriverClass) -> Option<&AiProfile> {
        match class {
            DriverClass::Manual => None,
            DriverClass::Assisted => Some(&self.assisted_ai),
            DriverClass::Traffic => Some(&self.traffic_ai),
        }
    }

    /// Obstacles whose longitudinal position exceeds this are culled
    pub fn cull_line(&self) -> f32 {
        self.visible_height + self.cull_margin
    }

    /// Longitudinal position of the player's box (top edge)
    pub fn player_y(&self) -> f32 {
        self.visible_height - self.car_height - self.player_bottom_margin
    }

    /// Check every invariant. Values are reported, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("visible_height", self.visible_height)?;
        non_negative("cull_margin", self.cull_margin)?;
        positive("lane_width", self.lane_width)?;
        positive("road_width", self.road_width)?;
        if self.lane_width * 3.0 > self.road_width {
            return Err(ConfigError::LanesExceedRoad {
                lane_width: self.lane_width,
                road_width: self.road_width,
            });
        }
        positive("scroll_speed", self.scroll_speed)?;
        // Culling only happens past the bottom line
        let travel = self.scroll_speed * (1.0 + self.traffic_speed_factor);
        if positive("traffic travel", travel).is_err() {
            return Err(ConfigError::TrafficStalled {
                factor: self.traffic_speed_factor,
                travel,
            });
        }

        if self.segment_count == 0 || self.noise_point_count == 0 {
            return Err(ConfigError::EmptyCurve);
        }
        non_negative("curve_amplitude", self.curve_amplitude)?;
        positive("curve_wavelength", self.curve_wavelength)?;
        probability("straight_chance", self.straight_chance)?;
        range("amplitude_range", self.amplitude_range)?;
        non_negative("amplitude_range.min", self.amplitude_range.min)?;
        range("wavelength_range", self.wavelength_range)?;
        positive("wavelength_range.min", self.wavelength_range.min)?;
        range("segment_length_range", self.segment_length_range)?;
        positive("segment_length_range.min", self.segment_length_range.min)?;
        non_negative("noise_span", self.noise_span)?;
        non_negative("noise_weight", self.noise_weight)?;

        positive("car_width", self.car_width)?;
        positive("car_height", self.car_height)?;
        positive("rotation_rate", self.rotation_rate)?;
        non_negative("max_heading", self.max_heading)?;
        positive("manual.lane_step", self.manual.lane_step)?;
        positive("assisted.lane_step", self.assisted.lane_step)?;
        positive("traffic.lane_step", self.traffic.lane_step)?;
        positive(
            "assisted_ai.decision_interval",
            self.assisted_ai.decision_interval as f32,
        )?;
        positive(
            "traffic_ai.decision_interval",
            self.traffic_ai.decision_interval as f32,
        )?;
        positive("assisted_ai.look_ahead", self.assisted_ai.look_ahead)?;
        positive("traffic_ai.look_ahead", self.traffic_ai.look_ahead)?;

        positive("spawn_delay", self.spawn_delay as f32)?;
        let w = self.spawn_weights;
        if w.traffic == 0 && w.debris == 0 && w.barrier == 0 {
            return Err(ConfigError::NoSpawnWeight);
        }
        non_negative("spawn_spacing", self.spawn_spacing)?;
        positive("debris_size", self.debris_size)?;
        positive("barrier_width_factor", self.barrier_width_factor)?;
        positive("barrier_height", self.barrier_height)?;
        Ok(())
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this comparison too
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            field,
            value: value as f64,
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative {
            field,
            value: value as f64,
        })
    }
}

fn probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { field, value })
    }
}

fn range(field: &'static str, range: Range) -> Result<(), ConfigError> {
    if range.min <= range.max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            field,
            min: range.min,
            max: range.max,
        })
    }
}
