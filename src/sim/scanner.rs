//! Intersection scanner
//!
//! Finds the nearest object along a ray that matters to the beam: a gate or a
//! boundary. Solid colliders are passed through. When nothing relevant lies
//! ahead the scanner reports a synthetic far boundary so open scenes still
//! terminate cleanly.

use glam::Vec2;

use super::gate::Gate;
use super::scene::{ObjectId, ObjectRole, Scene};

/// Result of a scan
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub point: Vec2,
    /// Unit surface normal oriented against the ray (zero for the far boundary)
    pub normal: Vec2,
    pub distance: f32,
    /// Beam stops here with its power absorbed
    pub is_boundary: bool,
    pub gate: Option<Gate>,
    /// Object that was hit; `None` for the far boundary
    pub object: Option<ObjectId>,
}

impl Hit {
    /// Synthetic hit for a ray that escaped the scene
    pub fn far(origin: Vec2, dir: Vec2, far_distance: f32) -> Self {
        Self {
            point: origin + dir * far_distance,
            normal: Vec2::ZERO,
            distance: far_distance,
            is_boundary: true,
            gate: None,
            object: None,
        }
    }

    pub fn is_far(&self) -> bool {
        self.is_boundary && self.object.is_none()
    }
}

/// Nearest gate or boundary along `dir` from `origin`, skipping `ignore`
pub fn scan(
    scene: &Scene,
    origin: Vec2,
    dir: Vec2,
    ignore: Option<ObjectId>,
    far_distance: f32,
) -> Hit {
    for ray_hit in scene.raycast_all(origin, dir) {
        if Some(ray_hit.object) == ignore {
            continue;
        }
        let Some(object) = scene.get(ray_hit.object) else {
            continue;
        };

        let (is_boundary, gate) = match object.role {
            ObjectRole::Gate(gate) => (false, Some(gate)),
            ObjectRole::Boundary => (true, None),
            ObjectRole::Solid => continue,
        };

        return Hit {
            point: ray_hit.point,
            normal: ray_hit.normal,
            distance: ray_hit.distance,
            is_boundary,
            gate,
            object: Some(ray_hit.object),
        };
    }

    Hit::far(origin, dir, far_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FAR_DISTANCE;
    use crate::sim::gate::GateKind;
    use crate::sim::scene::Collider;

    fn wall(x: f32) -> Collider {
        Collider::Segment {
            a: Vec2::new(x, -10.0),
            b: Vec2::new(x, 10.0),
        }
    }

    #[test]
    fn test_empty_scene_hits_far_boundary() {
        let scene = Scene::new();
        let hit = scan(&scene, Vec2::ZERO, Vec2::Y, None, FAR_DISTANCE);
        assert!(hit.is_far());
        assert_eq!(hit.point, Vec2::new(0.0, FAR_DISTANCE));
    }

    #[test]
    fn test_solids_are_transparent() {
        let mut scene = Scene::new();
        scene.add(wall(10.0), ObjectRole::Solid);
        let mirror = scene.add_gate(wall(30.0), GateKind::Mirror);

        let hit = scan(&scene, Vec2::ZERO, Vec2::X, None, FAR_DISTANCE);
        assert_eq!(hit.object, Some(mirror));
        assert_eq!(hit.gate.map(|g| g.kind), Some(GateKind::Mirror));
        assert!(!hit.is_boundary);
        assert!((hit.distance - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_ignore_skips_previous_object() {
        let mut scene = Scene::new();
        let lens = scene.add_gate(
            Collider::Circle {
                center: Vec2::new(20.0, 0.0),
                radius: 4.0,
            },
            GateKind::DivergingLens,
        );
        let boundary = scene.add(wall(60.0), ObjectRole::Boundary);

        let first = scan(&scene, Vec2::ZERO, Vec2::X, None, FAR_DISTANCE);
        assert_eq!(first.object, Some(lens));

        let next = scan(&scene, first.point, Vec2::X, first.object, FAR_DISTANCE);
        assert_eq!(next.object, Some(boundary));
        assert!(next.is_boundary);
        assert!(next.gate.is_none());
    }
}
