//! Lane Runner - simulation core of a lane-based endless driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (road curves, lanes, actors, obstacles, tick)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration and lane-change errors

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, LaneChangeRejected};
pub use tuning::Tuning;

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Fixed simulation rate used by the headless driver
    pub const TICK_RATE: u32 = 60;

    /// Viewport height (obstacles are culled past this plus the cull margin)
    pub const VISIBLE_HEIGHT: f32 = 600.0;
    /// Distance past the visible area before an obstacle is culled
    pub const CULL_MARGIN: f32 = 100.0;
    /// Longitudinal position new obstacles appear at (above the viewport)
    pub const SPAWN_Y: f32 = -50.0;
    /// Gap between the player's box and the bottom of the viewport
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    /// Road layout
    pub const BASE_ROAD_CENTER: f32 = 400.0;
    pub const LANE_WIDTH: f32 = 100.0;
    pub const ROAD_WIDTH: f32 = 300.0;
    /// Road advance per tick
    pub const SCROLL_SPEED: f32 = 5.0;

    /// Vehicle box (player and traffic)
    pub const CAR_WIDTH: f32 = 40.0;
    pub const CAR_HEIGHT: f32 = 70.0;

    /// Heading pursuit (radians per tick, radians)
    pub const ROTATION_RATE: f32 = 0.035;
    pub const MAX_HEADING: f32 = 0.26;

    /// Curve generation
    pub const ROAD_SEGMENTS: u32 = 20;
    pub const NOISE_POINTS: u32 = 50;
    pub const CURVE_AMPLITUDE: f32 = 100.0;
    pub const CURVE_WAVELENGTH: f32 = 800.0;

    /// Ticks between spawn attempts
    pub const SPAWN_DELAY: u32 = 60;
}

/// Step `current` toward `target` by at most `max_step`, never overshooting
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    current + (target - current).clamp(-max_step, max_step)
}
