//! Wave sampling for beam segments
//!
//! Turns a straight segment into a sine polyline. Purely visual: the tracing
//! math and damage always use the straight segment.

use glam::Vec2;
use std::f32::consts::{PI, TAU};
use std::iter::FusedIterator;

use crate::perp;
use crate::settings::WaveSettings;

/// Power ratios outside this range stop changing the wave shape
const MIN_RATIO: f32 = 0.125;
const MAX_RATIO: f32 = 8.0;

/// Sample a wave over `start -> end`
///
/// Stronger beams (higher `power_ratio`) get a shorter wavelength and a taller
/// wave; step density follows the wavelength so the curve looks equally smooth
/// at any power. The amplitude tapers to zero at both ends, so the first and
/// last points are exactly `start` and `end`.
pub fn sample(
    start: Vec2,
    end: Vec2,
    power_ratio: f32,
    time: f32,
    params: &WaveSettings,
) -> WaveSamples {
    let axis = end - start;
    let length = axis.length();

    let ratio = if power_ratio.is_finite() {
        power_ratio.clamp(MIN_RATIO, MAX_RATIO)
    } else {
        1.0
    };
    let wavelength = params.wavelength.max(1e-3) / ratio;
    let step_len = wavelength / params.samples_per_wavelength.max(1) as f32;
    let steps = ((length / step_len).ceil() as u32).clamp(1, params.max_steps.max(1));

    let amplitude = if length > 1e-6 {
        params.amplitude * ratio.sqrt()
    } else {
        0.0
    };

    WaveSamples {
        start,
        end,
        axis,
        normal: perp(axis).normalize_or_zero(),
        amplitude,
        cycles: length / wavelength,
        phase: time * params.speed,
        steps,
        next: 0,
    }
}

/// Points along a sampled wave, `steps + 1` in total
#[derive(Debug, Clone)]
pub struct WaveSamples {
    start: Vec2,
    end: Vec2,
    axis: Vec2,
    normal: Vec2,
    amplitude: f32,
    /// Number of wavelengths spanning the segment
    cycles: f32,
    phase: f32,
    steps: u32,
    next: u32,
}

impl WaveSamples {
    pub fn steps(&self) -> u32 {
        self.steps
    }
}

impl Iterator for WaveSamples {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.next > self.steps {
            return None;
        }
        let i = self.next;
        self.next += 1;

        if i == 0 {
            return Some(self.start);
        }
        if i == self.steps {
            return Some(self.end);
        }

        let t = i as f32 / self.steps as f32;
        let envelope = (PI * t).sin();
        let offset = self.amplitude * envelope * (TAU * self.cycles * t - self.phase).sin();
        Some(self.start + self.axis * t + self.normal * offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps as usize + 1).saturating_sub(self.next as usize);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WaveSamples {}
impl FusedIterator for WaveSamples {}
