//! Frame-scoped pool of beam render primitives
//!
//! Primitives are keyed by segment emission order. A frame binds indices
//! `0..n` in order, reusing whatever already lives at each index, and the
//! surplus left over from a bigger previous frame is dropped once the whole
//! tree has been traced. Same topology on consecutive frames means the same
//! primitive instances, so nothing pops.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes::{power_color, power_width};
use super::wave;
use crate::settings::BeamSettings;
use crate::sim::BeamSegment;

/// Light/particle marker drawn where a segment ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectMarker {
    pub pos: Vec2,
    pub radius: f32,
    /// Brightness in 0..=1
    pub intensity: f32,
}

/// Drawable backing one beam segment
#[derive(Debug, Clone)]
pub struct RenderPrimitive {
    id: u32,
    /// Polyline positions
    pub points: Vec<Vec2>,
    pub marker: Option<EffectMarker>,
    pub power: u32,
    pub width: f32,
    pub color: [f32; 4],
}

impl RenderPrimitive {
    fn new(id: u32) -> Self {
        Self {
            id,
            points: Vec::new(),
            marker: None,
            power: 0,
            width: 0.0,
            color: [0.0; 4],
        }
    }

    /// Pool-assigned identity, stable for the primitive's lifetime
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Overwrite this primitive's geometry with a segment
    ///
    /// Segments longer than the render distance (escaped rays) are clipped and
    /// get no end marker. The point buffer is reused, not reallocated.
    pub fn write_segment(
        &mut self,
        segment: &BeamSegment,
        settings: &BeamSettings,
        time: f32,
        flicker: f32,
    ) {
        let length = segment.length();
        let clipped = length > settings.render_distance;
        let end = if clipped {
            segment.origin + segment.direction * settings.render_distance
        } else {
            segment.endpoint
        };
        let ratio = settings.power_ratio(segment.power);

        self.points.clear();
        if settings.wave_enabled {
            self.points
                .extend(wave::sample(segment.origin, end, ratio, time, &settings.wave));
        } else {
            self.points.extend([segment.origin, end]);
        }

        self.power = segment.power;
        self.width = power_width(segment.power, settings.base_power, settings.beam_width);
        self.color = power_color(segment.power, settings.base_power, 1.0);

        self.marker = if settings.effective_markers() && !clipped {
            Some(EffectMarker {
                pos: end,
                radius: self.width * 2.5,
                intensity: (ratio.sqrt() * 0.5).min(1.0) * flicker,
            })
        } else {
            None
        };
    }
}

/// Index-stable arena of render primitives
#[derive(Debug)]
pub struct SegmentPool {
    primitives: Vec<RenderPrimitive>,
    /// Primitives bound so far this frame (high-water mark)
    bound: usize,
    next_id: u32,
    rng: Pcg32,
}

impl SegmentPool {
    pub fn new(seed: u64) -> Self {
        Self {
            primitives: Vec::new(),
            bound: 0,
            next_id: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start binding a new frame; existing primitives stay allocated
    pub fn begin_frame(&mut self) {
        self.bound = 0;
    }

    /// Primitive for the segment emitted at `index`
    ///
    /// Reuses the primitive already at `index` from an earlier frame, otherwise
    /// allocates and appends one. Indices are expected in emission order.
    pub fn acquire(&mut self, index: usize) -> &mut RenderPrimitive {
        while self.primitives.len() <= index {
            let id = self.next_id;
            self.next_id = self.next_id.wrapping_add(1);
            self.primitives.push(RenderPrimitive::new(id));
        }
        self.bound = self.bound.max(index + 1);
        &mut self.primitives[index]
    }

    /// Drop every primitive not bound this frame; returns how many were released
    pub fn release_unused(&mut self) -> usize {
        let surplus = self.primitives.len().saturating_sub(self.bound);
        if surplus > 0 {
            self.primitives.truncate(self.bound);
            log::debug!(
                "Released {} beam primitives ({} bound)",
                surplus,
                self.bound
            );
        }
        surplus
    }

    /// Primitives bound this frame, in emission order
    pub fn bound(&self) -> &[RenderPrimitive] {
        &self.primitives[..self.bound.min(self.primitives.len())]
    }

    /// Primitives currently allocated, bound or not
    pub fn allocated(&self) -> usize {
        self.primitives.len()
    }

    /// Marker brightness jitter for the next primitive
    pub fn flicker(&mut self) -> f32 {
        self.rng.random_range(0.85..=1.0)
    }
}
