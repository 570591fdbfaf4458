//! Beam segments produced by a trace

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One straight stretch of beam, valid for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSegment {
    pub origin: Vec2,
    pub endpoint: Vec2,
    /// Unit direction from origin to endpoint
    pub direction: Vec2,
    /// Damage per second dealt to anything the segment overlaps
    pub power: u32,
    /// Depth budget left when this segment was emitted
    pub depth: u32,
}

impl BeamSegment {
    pub fn length(&self) -> f32 {
        self.origin.distance(self.endpoint)
    }

    /// Closest point on the segment to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let line = self.endpoint - self.origin;
        let len_sq = line.length_squared();
        if len_sq < 1e-8 {
            return self.origin;
        }
        let t = ((p - self.origin).dot(line) / len_sq).clamp(0.0, 1.0);
        self.origin + line * t
    }

    pub fn distance_to(&self, p: Vec2) -> f32 {
        p.distance(self.closest_point(p))
    }

    /// Overlap test for a round entity, treating the beam as `half_width` thick
    pub fn overlaps_circle(&self, center: Vec2, radius: f32, half_width: f32) -> bool {
        self.distance_to(center) <= radius + half_width
    }

    /// Damage dealt over `dt` seconds of overlap
    #[inline]
    pub fn damage_over(&self, dt: f32) -> f32 {
        self.power as f32 * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> BeamSegment {
        BeamSegment {
            origin: Vec2::ZERO,
            endpoint: Vec2::new(100.0, 0.0),
            direction: Vec2::X,
            power: 12,
            depth: 3,
        }
    }

    #[test]
    fn test_closest_point_clamps_to_ends() {
        let s = segment();
        assert_eq!(s.closest_point(Vec2::new(-20.0, 5.0)), Vec2::ZERO);
        assert_eq!(s.closest_point(Vec2::new(50.0, 5.0)), Vec2::new(50.0, 0.0));
        assert_eq!(s.closest_point(Vec2::new(150.0, 0.0)), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_overlaps_circle() {
        let s = segment();
        assert!(s.overlaps_circle(Vec2::new(50.0, 9.0), 8.0, 2.0));
        assert!(!s.overlaps_circle(Vec2::new(50.0, 11.0), 8.0, 2.0));
        assert!(!s.overlaps_circle(Vec2::new(115.0, 0.0), 8.0, 2.0));
    }

    #[test]
    fn test_damage_over() {
        assert!((segment().damage_over(0.5) - 6.0).abs() < 1e-6);
    }
}
