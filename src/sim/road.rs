//! Road state and lane geometry
//!
//! The road is a fixed-width band whose center follows the curve field,
//! sampled at `pos + scroll_offset`. Lanes are laid out from the left edge.

use rand::Rng;

use super::curve::CurveField;
use super::lane::{LANE_COUNT, Lane};
use crate::tuning::Tuning;

/// Per-session road: curve field plus the scrolled distance
#[derive(Debug, Clone)]
pub struct Road {
    curve: CurveField,
    /// Decreases as the road advances. Kept in f64 so long runs don't lose
    /// sub-unit precision before the curve lookup wraps it.
    scroll_offset: f64,
    base_center: f32,
    road_width: f32,
    lane_width: f32,
}

impl Road {
    pub fn new(curve: CurveField, tuning: &Tuning) -> Self {
        Self {
            curve,
            scroll_offset: 0.0,
            base_center: tuning.base_center,
            road_width: tuning.road_width,
            lane_width: tuning.lane_width,
        }
    }

    /// Generate a fresh curving road
    pub fn generate<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Self {
        Self::new(CurveField::generate(tuning, rng), tuning)
    }

    /// A road with no curvature (repeats every `curve_wavelength`)
    pub fn straight(tuning: &Tuning) -> Self {
        Self::new(CurveField::straight(tuning.curve_wavelength), tuning)
    }

    pub fn curve(&self) -> &CurveField {
        &self.curve
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn road_width(&self) -> f32 {
        self.road_width
    }

    pub fn lane_width(&self) -> f32 {
        self.lane_width
    }

    /// Advance the road by `amount` units
    pub fn scroll(&mut self, amount: f32) {
        self.scroll_offset -= amount as f64;
    }

    /// Cumulative curve position seen at screen position `pos`
    fn curve_position(&self, pos: f32) -> f32 {
        let total = self.curve.total_length() as f64;
        (pos as f64 + self.scroll_offset).rem_euclid(total) as f32
    }

    /// X of the road center at longitudinal position `pos`
    pub fn center(&self, pos: f32) -> f32 {
        self.base_center + self.curve.lateral_offset(self.curve_position(pos))
    }

    /// Left and right road edges at `pos`
    pub fn edges(&self, pos: f32) -> (f32, f32) {
        let center = self.center(pos);
        let half = self.road_width / 2.0;
        (center - half, center + half)
    }

    /// Lane centers at `pos`, left to right
    pub fn lane_positions(&self, pos: f32) -> [f32; LANE_COUNT] {
        let (left, _) = self.edges(pos);
        std::array::from_fn(|i| left + (i as f32 + 0.5) * self.lane_width)
    }

    pub fn lane_center(&self, pos: f32, lane: Lane) -> f32 {
        self.lane_positions(pos)[lane.index()]
    }
}
