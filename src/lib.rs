//! Beam Gates - real-time 2D beam propagation
//!
//! Core modules:
//! - `sim`: Beam tracing (gates, scene queries, scanner, tracer, per-tick driver)
//! - `renderer`: Pooled render primitives, wave sampling, mesh building
//! - `settings`: Data-driven beam tuning

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{BeamSettings, QualityPreset, WaveSettings};

use glam::Vec2;

/// Beam configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz, matches the physics step)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Distance of the synthetic hit used when a ray escapes the scene
    pub const FAR_DISTANCE: f32 = 10_000.0;
    /// Longest stretch of a single segment that gets drawn
    pub const RENDER_DISTANCE: f32 = 1_500.0;

    /// Default depth budget (bounces) for a fresh beam
    pub const DEFAULT_INTENSITY: u32 = 6;
    /// Default power (damage per second) at the emitter
    pub const BASE_POWER: u32 = 16;
    /// Hard ceiling on segments emitted by one trace
    pub const MAX_SEGMENTS: usize = 256;

    /// Rays ignore intersections closer than this to their origin
    pub const RAY_EPSILON: f32 = 1e-4;

    /// Highest supported diffraction level
    pub const MAX_DIFFRACTION_LEVEL: u8 = 5;
}

/// Counter-clockwise perpendicular
#[inline]
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Rotate a vector counter-clockwise by `degrees`
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Reflect a direction off a surface with the given unit normal
///
/// Standard reflection: d' = d - 2(d·n)n
#[inline]
pub fn reflect(dir: Vec2, normal: Vec2) -> Vec2 {
    dir - 2.0 * dir.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rotate_quarter_turn() {
        let r = rotate_deg(Vec2::X, 90.0);
        assert!((r - Vec2::Y).length() < 1e-5);
        let r = rotate_deg(Vec2::X, -90.0);
        assert!((r + Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn test_reflect_head_on() {
        // Beam moving right, hits a surface whose normal faces back left
        let reflected = reflect(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x + 1.0).abs() < 1e-6);
        assert!(reflected.y.abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn reflect_is_self_inverse(angle in 0.0f32..360.0, normal_angle in 0.0f32..360.0) {
            let d = rotate_deg(Vec2::X, angle);
            let n = rotate_deg(Vec2::X, normal_angle);
            let back = reflect(reflect(d, n), n);
            prop_assert!((back - d).length() < 1e-4);
        }

        #[test]
        fn reflect_preserves_length(angle in 0.0f32..360.0, normal_angle in 0.0f32..360.0) {
            let d = rotate_deg(Vec2::X, angle);
            let n = rotate_deg(Vec2::X, normal_angle);
            prop_assert!((reflect(d, n).length() - 1.0).abs() < 1e-4);
        }
    }
}
