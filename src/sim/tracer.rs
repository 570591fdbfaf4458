//! Beam tracer
//!
//! Walks the beam tree depth-first from the emitter. Each step scans for the
//! nearest gate or boundary, emits one segment (binding a render primitive to
//! it) and asks the gate for its outgoing branches. Every bounce costs exactly
//! one unit of depth, shared by all branches leaving that gate, so the walk
//! always ends within the starting budget.
//!
//! The walk runs on an explicit stack with children pushed in reverse, which
//! yields the same emission order as plain recursion: the continuation first,
//! then diffraction pairs, left before right. Primitive reuse depends on that
//! order staying stable frame to frame.

use glam::Vec2;

use super::gate::GateKind;
use super::scanner::scan;
use super::scene::{ObjectId, Scene};
use super::segment::BeamSegment;
use crate::renderer::SegmentPool;
use crate::settings::BeamSettings;

/// A beam waiting to be traced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamRay {
    /// Depth budget remaining; 0 emits nothing
    pub depth: u32,
    pub origin: Vec2,
    /// Unit direction
    pub direction: Vec2,
    /// Object the ray is leaving (skipped by the scan)
    pub ignore: Option<ObjectId>,
    pub power: u32,
}

/// Everything a trace reads and writes
pub struct TraceContext<'a> {
    pub scene: &'a Scene,
    pub settings: &'a BeamSettings,
    pub pool: &'a mut SegmentPool,
    /// Output: segments in emission order
    pub segments: &'a mut Vec<BeamSegment>,
    /// Seconds since start, drives the wave phase
    pub time: f32,
}

/// Summary of one trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    pub emitted: usize,
    /// Stopped early at the segment ceiling
    pub truncated: bool,
    /// Branches ended on a gate kind this build doesn't handle
    pub unsupported_hits: usize,
}

/// Trace a beam tree, appending its segments and binding one primitive per segment
pub fn trace(ctx: &mut TraceContext<'_>, root: BeamRay) -> TraceStats {
    let mut stats = TraceStats::default();
    if root.depth == 0 || root.direction == Vec2::ZERO {
        return stats;
    }

    let max_segments = ctx.settings.max_segments;
    let mut stack = vec![root];

    while let Some(ray) = stack.pop() {
        if ctx.segments.len() >= max_segments {
            stats.truncated = true;
            log::warn!(
                "Beam tree hit the {} segment ceiling, {} branches dropped",
                max_segments,
                stack.len() + 1
            );
            break;
        }

        let hit = scan(
            ctx.scene,
            ray.origin,
            ray.direction,
            ray.ignore,
            ctx.settings.far_distance,
        );

        emit(
            ctx,
            BeamSegment {
                origin: ray.origin,
                endpoint: hit.point,
                direction: ray.direction,
                power: ray.power,
                depth: ray.depth,
            },
        );
        stats.emitted += 1;

        let depth = ray.depth - 1;
        if depth == 0 || hit.is_boundary {
            continue;
        }
        let Some(gate) = hit.gate else {
            continue;
        };
        if gate.kind == GateKind::Unsupported {
            stats.unsupported_hits += 1;
            continue;
        }

        let branches = gate.kind.branches(ray.direction, hit.normal, ray.power);
        for branch in branches.into_iter().rev() {
            if branch.dir == Vec2::ZERO {
                continue;
            }
            stack.push(BeamRay {
                depth,
                origin: hit.point,
                direction: branch.dir,
                ignore: hit.object,
                power: branch.power,
            });
        }
    }

    // Once per trace, not per hit: the same gate is hit every tick
    if stats.unsupported_hits > 0 {
        log::warn!(
            "Beam hit unsupported gate kinds {} times, those branches terminated",
            stats.unsupported_hits
        );
    }

    stats
}

fn emit(ctx: &mut TraceContext<'_>, segment: BeamSegment) {
    let index = ctx.segments.len();
    let flicker = ctx.pool.flicker();
    ctx.pool
        .acquire(index)
        .write_segment(&segment, ctx.settings, ctx.time, flicker);
    ctx.segments.push(segment);
}
