//! Procedural road curvature
//!
//! The road's lateral offset is a cyclic chain of waveform segments plus a
//! sparse, linearly interpolated noise track. Everything is generated once
//! from the session RNG; queries are pure.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tuning::{Tuning, positive};

/// Shape of a curve segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Cosine,
    /// Piecewise-linear zig-zag (phase offset is ignored)
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 3] = [Waveform::Sine, Waveform::Cosine, Waveform::Triangle];

    /// Unit-amplitude value after `cycles` wave periods
    pub fn sample(self, cycles: f32, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (cycles * TAU + phase).sin(),
            Waveform::Cosine => (cycles * TAU + phase).cos(),
            Waveform::Triangle => {
                let x = cycles.rem_euclid(1.0) * 4.0;
                if x < 1.0 {
                    x
                } else if x < 3.0 {
                    2.0 - x
                } else {
                    x - 4.0
                }
            }
        }
    }
}

/// One stretch of road with a single waveform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    /// Signed peak offset (0 = straight)
    pub amplitude: f32,
    pub wavelength: f32,
    pub phase_offset: f32,
    pub length: f32,
    /// Cumulative position where this segment begins
    pub start: f32,
    pub waveform: Waveform,
}

impl CurveSegment {
    /// Lateral offset `local` units into the segment
    pub fn offset_at(&self, local: f32) -> f32 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        self.amplitude * self.waveform.sample(local / self.wavelength, self.phase_offset)
    }
}

/// A noise control point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoisePoint {
    pub position: f32,
    pub offset: f32,
}

/// Lateral offset as a function of cumulative road position
#[derive(Debug, Clone, PartialEq)]
pub struct CurveField {
    segments: Vec<CurveSegment>,
    /// Sorted by position, all within `[0, total_length)`
    noise: Vec<NoisePoint>,
    total_length: f32,
    noise_weight: f32,
}

impl CurveField {
    /// Generate a random field from the tuning's curve parameters
    pub fn generate<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Self {
        let base_amplitude = tuning.curve_amplitude;
        let base_wavelength = tuning.curve_wavelength;
        let amp_range = tuning.amplitude_range;
        let wave_range = tuning.wavelength_range;
        let len_range = tuning.segment_length_range;

        let mut segments = Vec::with_capacity(tuning.segment_count as usize);
        let mut start = 0.0;
        for _ in 0..tuning.segment_count {
            let direction: f32 = rng.random_range(-1.0..=1.0);
            let amplitude = if rng.random::<f32>() < tuning.straight_chance {
                0.0
            } else {
                rng.random_range(amp_range.min * base_amplitude..=amp_range.max * base_amplitude)
                    * direction
            };
            let wavelength =
                rng.random_range(wave_range.min * base_wavelength..=wave_range.max * base_wavelength);
            let phase_offset = rng.random_range(0.0..TAU);
            let length = wavelength * rng.random_range(len_range.min..=len_range.max);
            let waveform = Waveform::ALL[rng.random_range(0..Waveform::ALL.len())];

            segments.push(CurveSegment {
                amplitude,
                wavelength,
                phase_offset,
                length,
                start,
                waveform,
            });
            start += length;
        }
        let total_length = start;

        // Spread the noise track evenly so it joins up across the seam
        let count = tuning.noise_point_count as usize;
        let spacing = total_length / count as f32;
        let span = tuning.noise_span * base_amplitude;
        let noise = (0..count)
            .map(|i| NoisePoint {
                position: i as f32 * spacing,
                offset: rng.random_range(-span..=span),
            })
            .collect();

        Self {
            segments,
            noise,
            total_length,
            noise_weight: tuning.noise_weight,
        }
    }

    /// Build a field from explicit parts. Segment starts are recomputed to be
    /// contiguous and noise positions are wrapped into the road length.
    pub fn from_parts(
        mut segments: Vec<CurveSegment>,
        mut noise: Vec<NoisePoint>,
        noise_weight: f32,
    ) -> Result<Self, ConfigError> {
        if segments.is_empty() || noise.is_empty() {
            return Err(ConfigError::EmptyCurve);
        }
        let mut start = 0.0;
        for segment in &mut segments {
            positive("segment.length", segment.length)?;
            positive("segment.wavelength", segment.wavelength)?;
            segment.start = start;
            start += segment.length;
        }
        let mut field = Self {
            segments,
            noise: Vec::new(),
            total_length: start,
            noise_weight,
        };

        for point in &mut noise {
            point.position = field.wrap(point.position);
        }
        noise.sort_by(|a, b| a.position.total_cmp(&b.position));
        field.noise = noise;
        Ok(field)
    }

    /// A field with no curvature at all
    pub fn straight(length: f32) -> Self {
        Self {
            segments: vec![CurveSegment {
                amplitude: 0.0,
                wavelength: length,
                phase_offset: 0.0,
                length,
                start: 0.0,
                waveform: Waveform::Sine,
            }],
            noise: vec![NoisePoint {
                position: 0.0,
                offset: 0.0,
            }],
            total_length: length,
            noise_weight: 0.0,
        }
    }

    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    pub fn noise_points(&self) -> &[NoisePoint] {
        &self.noise
    }

    /// Length after which the road repeats
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Fold any position into `[0, total_length)`
    pub fn wrap(&self, pos: f32) -> f32 {
        let p = pos.rem_euclid(self.total_length);
        // rem_euclid can round up to the modulus for tiny negative inputs
        if p >= self.total_length { 0.0 } else { p }
    }

    /// Segment containing `pos` and the offset into it
    pub fn segment_at(&self, pos: f32) -> (&CurveSegment, f32) {
        let p = self.wrap(pos);
        let index = self
            .segments
            .partition_point(|s| s.start <= p)
            .saturating_sub(1);
        let segment = &self.segments[index];
        (segment, p - segment.start)
    }

    /// Lateral offset of the road center at cumulative position `pos`
    pub fn lateral_offset(&self, pos: f32) -> f32 {
        let p = self.wrap(pos);
        let (segment, local) = self.segment_at(p);
        segment.offset_at(local) + self.noise_at(p) * self.noise_weight
    }

    /// Interpolated noise between the control points around `p`
    fn noise_at(&self, p: f32) -> f32 {
        let len = self.noise.len();
        let next_index = self.noise.partition_point(|n| n.position <= p);
        let (prev, next) = if next_index == 0 {
            let last = self.noise[len - 1];
            let prev = NoisePoint {
                position: last.position - self.total_length,
                ..last
            };
            (prev, self.noise[0])
        } else if next_index == len {
            let first = self.noise[0];
            let next = NoisePoint {
                position: first.position + self.total_length,
                ..first
            };
            (self.noise[len - 1], next)
        } else {
            (self.noise[next_index - 1], self.noise[next_index])
        };
        interpolate(prev, next, p)
    }
}

fn interpolate(prev: NoisePoint, next: NoisePoint, pos: f32) -> f32 {
    if next.position == prev.position {
        return next.offset;
    }
    let t = (pos - prev.position) / (next.position - prev.position);
    prev.offset + t * (next.offset - prev.offset)
}
