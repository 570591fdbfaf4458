//! Mesh generation for beam primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::pool::{EffectMarker, RenderPrimitive};
use super::vertex::{Vertex, colors};

fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Interpolate color from power relative to the base power (weak=violet, base=cyan, strong=white)
pub fn power_color(power: u32, base_power: u32, alpha: f32) -> [f32; 4] {
    let ratio = power as f32 / base_power.max(1) as f32;

    let [r, g, b] = if ratio < 1.0 {
        lerp_color(colors::BEAM_DIM, colors::BEAM_BASE, ratio)
    } else {
        // Saturates at 4x base power
        let t = ((ratio - 1.0) / 3.0).min(1.0);
        lerp_color(colors::BEAM_BASE, colors::BEAM_HOT, t)
    };

    [r, g, b, alpha]
}

/// Beam width for a given power (thin beams stay visible)
pub fn power_width(power: u32, base_power: u32, base_width: f32) -> f32 {
    let ratio = power as f32 / base_power.max(1) as f32;
    base_width * ratio.sqrt().clamp(0.35, 2.5)
}

/// Generate vertices for a polyline of constant width
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    extend_polyline(&mut vertices, points, width, color);
    vertices
}

fn extend_polyline(vertices: &mut Vec<Vertex>, points: &[Vec2], width: f32, color: [f32; 4]) {
    if points.len() < 2 {
        return;
    }
    let half = width * 0.5;
    vertices.reserve((points.len() - 1) * 6);

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let dir = (p2 - p1).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        let side = Vec2::new(-dir.y, dir.x) * half;

        let v1a = p1 + side;
        let v1b = p1 - side;
        let v2a = p2 + side;
        let v2b = p2 - side;

        // Two triangles
        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }
}

/// Generate a glow disc for a marker, opaque in the middle and fading out
pub fn marker_glow(marker: &EffectMarker, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    extend_marker_glow(&mut vertices, marker, color, segments);
    vertices
}

fn extend_marker_glow(
    vertices: &mut Vec<Vertex>,
    marker: &EffectMarker,
    color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    let center = marker.pos;
    let inner = [color[0], color[1], color[2], color[3] * marker.intensity];
    let outer = [color[0], color[1], color[2], 0.0];
    vertices.reserve(segments as usize * 3);

    for i in 0..segments {
        let a1 = (i as f32 / segments as f32) * TAU;
        let a2 = ((i + 1) as f32 / segments as f32) * TAU;
        let e1 = center + Vec2::from_angle(a1) * marker.radius;
        let e2 = center + Vec2::from_angle(a2) * marker.radius;

        vertices.push(Vertex::new(center.x, center.y, inner));
        vertices.push(Vertex::new(e1.x, e1.y, outer));
        vertices.push(Vertex::new(e2.x, e2.y, outer));
    }
}

/// Build one vertex list for a frame's bound primitives (beams first, then glows on top)
pub fn build_mesh(primitives: &[RenderPrimitive]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for primitive in primitives {
        extend_polyline(
            &mut vertices,
            &primitive.points,
            primitive.width,
            primitive.color,
        );
    }
    for marker in primitives.iter().filter_map(|p| p.marker.as_ref()) {
        extend_marker_glow(&mut vertices, marker, colors::MARKER, 12);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_color_gradient() {
        assert_eq!(power_color(16, 16, 1.0), colors::BEAM_BASE);
        let hot = power_color(64, 16, 0.5);
        for (c, expected) in hot.iter().zip([1.0f32, 0.95, 0.85, 0.5]) {
            assert!((c - expected).abs() < 1e-5);
        }
        assert_eq!(power_color(0, 16, 1.0), colors::BEAM_DIM);
        // Zero base power doesn't divide by zero
        assert!(power_color(5, 0, 1.0).iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_polyline_two_triangles_per_edge() {
        let points = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        let vertices = polyline(&points, 2.0, colors::BEAM_BASE);
        assert_eq!(vertices.len(), 12);
        // First edge runs along +X, so its corners sit one unit above and below
        assert_eq!(vertices[0].position, [0.0, 1.0]);
        assert_eq!(vertices[1].position, [0.0, -1.0]);
    }

    #[test]
    fn test_polyline_skips_degenerate_edges() {
        let points = [Vec2::ZERO, Vec2::ZERO, Vec2::new(5.0, 0.0)];
        assert_eq!(polyline(&points, 1.0, colors::BEAM_BASE).len(), 6);
        assert!(polyline(&points[..1], 1.0, colors::BEAM_BASE).is_empty());
    }

    #[test]
    fn test_marker_glow_fades_out() {
        let marker = EffectMarker {
            pos: Vec2::new(4.0, 4.0),
            radius: 3.0,
            intensity: 0.5,
        };
        let vertices = marker_glow(&marker, colors::MARKER, 8);
        assert_eq!(vertices.len(), 24);
        assert_eq!(vertices[0].color[3], 0.5);
        assert_eq!(vertices[1].color[3], 0.0);
    }

    #[test]
    fn test_power_width_clamped() {
        assert_eq!(power_width(16, 16, 4.0), 4.0);
        assert_eq!(power_width(0, 16, 4.0), 4.0 * 0.35);
        assert_eq!(power_width(1 << 20, 16, 4.0), 10.0);
    }
}
