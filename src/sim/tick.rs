//! Fixed timestep beam update
//!
//! Rebuilds the whole beam tree once per physics step and keeps the render
//! pool in step with it.

use glam::Vec2;

use super::scene::Scene;
use super::segment::BeamSegment;
use super::tracer::{BeamRay, TraceContext, TraceStats, trace};
use crate::renderer::{RenderPrimitive, SegmentPool};
use crate::settings::BeamSettings;

/// Emitter position and aim for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterPose {
    pub position: Vec2,
    /// Aim direction (normalized by the tick; zero means not ready)
    pub direction: Vec2,
}

impl EmitterPose {
    pub fn new(position: Vec2, direction: Vec2) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Pose aimed at a world point
    pub fn aimed_at(position: Vec2, target: Vec2) -> Self {
        Self::new(position, target - position)
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Emitter pose, `None` while the emitter isn't placed yet
    pub emitter: Option<EmitterPose>,
}

/// Beam state carried across ticks
#[derive(Debug)]
pub struct BeamState {
    pub settings: BeamSettings,
    pub time_ticks: u64,
    pool: SegmentPool,
    segments: Vec<BeamSegment>,
    last_stats: TraceStats,
}

impl BeamState {
    pub fn new(settings: BeamSettings) -> Self {
        Self {
            pool: SegmentPool::new(settings.flicker_seed),
            settings,
            time_ticks: 0,
            segments: Vec::new(),
            last_stats: TraceStats::default(),
        }
    }

    /// This frame's segments, in emission order (damage/overlap input)
    pub fn segments(&self) -> &[BeamSegment] {
        &self.segments
    }

    /// This frame's bound primitives, index-aligned with `segments()`
    pub fn primitives(&self) -> &[RenderPrimitive] {
        self.pool.bound()
    }

    pub fn pool(&self) -> &SegmentPool {
        &self.pool
    }

    pub fn last_stats(&self) -> TraceStats {
        self.last_stats
    }

    /// Total damage per second a round entity takes from this frame's beam
    pub fn damage_rate_at(&self, center: Vec2, radius: f32) -> u64 {
        self.segments
            .iter()
            .zip(self.pool.bound())
            .filter(|(segment, primitive)| {
                segment.overlaps_circle(center, radius, primitive.width * 0.5)
            })
            .map(|(segment, _)| segment.power as u64)
            .sum()
    }
}

impl Default for BeamState {
    fn default() -> Self {
        Self::new(BeamSettings::default())
    }
}

/// Advance the beam by one fixed timestep
pub fn tick(state: &mut BeamState, scene: &Scene, input: &TickInput, dt: f32) {
    state.time_ticks += 1;
    state.segments.clear();
    state.pool.begin_frame();
    state.last_stats = TraceStats::default();

    let Some(pose) = input.emitter else {
        log::debug!("No emitter pose, beam skipped this tick");
        state.pool.release_unused();
        return;
    };
    let direction = pose.direction.normalize_or_zero();
    if direction == Vec2::ZERO || !pose.position.is_finite() {
        log::debug!("Emitter pose not ready, beam skipped this tick");
        state.pool.release_unused();
        return;
    }

    let mut ctx = TraceContext {
        scene,
        settings: &state.settings,
        pool: &mut state.pool,
        segments: &mut state.segments,
        time: state.time_ticks as f32 * dt,
    };
    state.last_stats = trace(
        &mut ctx,
        BeamRay {
            depth: state.settings.intensity,
            origin: pose.position,
            direction,
            ignore: None,
            power: state.settings.base_power,
        },
    );

    // Only after the full tree is bound, so a partial tree is never drawn
    state.pool.release_unused();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::gate::GateKind;
    use crate::sim::scene::{Collider, ObjectId};

    fn aim_right() -> TickInput {
        TickInput {
            emitter: Some(EmitterPose::new(Vec2::ZERO, Vec2::new(3.0, 0.0))),
        }
    }

    fn grating_scene() -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        let id = scene.add_gate(
            Collider::Segment {
                a: Vec2::new(50.0, -20.0),
                b: Vec2::new(50.0, 20.0),
            },
            GateKind::diffraction(2),
        );
        (scene, id)
    }

    fn primitive_ids(state: &BeamState) -> Vec<u32> {
        state.primitives().iter().map(|p| p.id()).collect()
    }

    #[test]
    fn test_tick_traces_with_settings() {
        let (scene, _) = grating_scene();
        let mut state = BeamState::default();
        tick(&mut state, &scene, &aim_right(), SIM_DT);

        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.segments().len(), 6);
        assert_eq!(state.primitives().len(), 6);
        assert_eq!(state.segments()[0].power, state.settings.base_power);
        assert_eq!(state.segments()[0].depth, state.settings.intensity);
        // Aim is normalized
        assert_eq!(state.segments()[0].direction, Vec2::X);
    }

    #[test]
    fn test_stable_topology_reuses_primitives() {
        let (scene, _) = grating_scene();
        let mut state = BeamState::default();

        tick(&mut state, &scene, &aim_right(), SIM_DT);
        let first = primitive_ids(&state);
        tick(&mut state, &scene, &aim_right(), SIM_DT);
        assert_eq!(primitive_ids(&state), first);
        assert_eq!(state.pool().allocated(), first.len());
    }

    #[test]
    fn test_removing_gate_shrinks_pool() {
        let (mut scene, grating) = grating_scene();
        let mut state = BeamState::default();

        tick(&mut state, &scene, &aim_right(), SIM_DT);
        let first = primitive_ids(&state);
        assert_eq!(first.len(), 6);

        scene.remove(grating);
        tick(&mut state, &scene, &aim_right(), SIM_DT);
        assert_eq!(state.segments().len(), 1);
        assert_eq!(primitive_ids(&state), first[..1]);
        assert_eq!(state.pool().allocated(), 1);
    }

    #[test]
    fn test_missing_pose_skips_trace_and_releases() {
        let (scene, _) = grating_scene();
        let mut state = BeamState::default();
        tick(&mut state, &scene, &aim_right(), SIM_DT);
        assert_eq!(state.pool().allocated(), 6);

        tick(&mut state, &scene, &TickInput::default(), SIM_DT);
        assert!(state.segments().is_empty());
        assert!(state.primitives().is_empty());
        assert_eq!(state.last_stats().emitted, 0);
        assert_eq!(state.pool().allocated(), 0);
    }

    #[test]
    fn test_zero_aim_skips_trace_and_releases() {
        let (scene, _) = grating_scene();
        let mut state = BeamState::default();
        tick(&mut state, &scene, &aim_right(), SIM_DT);

        let zero_aim = TickInput {
            emitter: Some(EmitterPose::new(Vec2::ZERO, Vec2::ZERO)),
        };
        tick(&mut state, &scene, &zero_aim, SIM_DT);
        assert!(state.segments().is_empty());
        assert_eq!(state.pool().allocated(), 0);

        // Beam comes back with fresh primitives
        tick(&mut state, &scene, &aim_right(), SIM_DT);
        assert_eq!(state.primitives().len(), 6);
    }

    #[test]
    fn test_damage_rate_sums_overlapping_segments() {
        let (scene, _) = grating_scene();
        let mut state = BeamState::default();
        tick(&mut state, &scene, &aim_right(), SIM_DT);

        let base = state.settings.base_power as u64;
        // Between the emitter and the grating only the incoming segment passes
        assert_eq!(state.damage_rate_at(Vec2::new(25.0, 0.0), 2.0), base);
        // Right behind the grating every branch overlaps
        let behind = state.damage_rate_at(Vec2::new(51.0, 0.0), 2.0);
        assert_eq!(behind, base + base + 8 + 8 + 4 + 4);
        assert_eq!(state.damage_rate_at(Vec2::new(-50.0, 40.0), 2.0), 0);
    }

    #[test]
    fn test_aimed_at() {
        let pose = EmitterPose::aimed_at(Vec2::new(1.0, 1.0), Vec2::new(1.0, 5.0));
        assert_eq!(pose.direction, Vec2::new(0.0, 4.0));
    }
}
