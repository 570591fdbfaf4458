//! Scene registry and multi-hit ray queries
//!
//! The scene is passive data owned by level logic. During a trace it is only
//! read: the scanner asks for every collider along a ray and picks from those.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gate::{Gate, GateKind};
use crate::consts::RAY_EPSILON;
use crate::perp;

/// Stable handle for a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Collision shape of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    /// Flat surface between two points (mirrors, gratings, walls)
    Segment { a: Vec2, b: Vec2 },
    /// Round body (lenses, entities)
    Circle { center: Vec2, radius: f32 },
}

/// What an object means to the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObjectRole {
    /// Interactive optical element
    Gate(Gate),
    /// Absorbs the beam outright
    Boundary,
    /// Collides with rays but is transparent to the beam (entities, props)
    Solid,
}

/// A placed scene object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub collider: Collider,
    pub role: ObjectRole,
}

impl SceneObject {
    pub fn gate(&self) -> Option<Gate> {
        match self.role {
            ObjectRole::Gate(gate) => Some(gate),
            _ => None,
        }
    }
}

/// One ray/collider intersection
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub object: ObjectId,
    /// Distance along the (unit) ray direction
    pub distance: f32,
    pub point: Vec2,
    /// Unit surface normal, oriented against the incoming ray
    pub normal: Vec2,
}

/// Collection of beam-relevant scene objects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    objects: Vec<SceneObject>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, returning its handle
    pub fn add(&mut self, collider: Collider, role: ObjectRole) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject { id, collider, role });
        id
    }

    /// Add a gate of the given kind
    pub fn add_gate(&mut self, collider: Collider, kind: GateKind) -> ObjectId {
        self.add(collider, ObjectRole::Gate(Gate::new(kind)))
    }

    /// Remove an object; returns false if it wasn't present
    pub fn remove(&mut self, id: ObjectId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        self.objects.len() != before
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Every collider along an unbounded ray, nearest first
    ///
    /// `dir` must be a unit vector. Intersections within `RAY_EPSILON` of the
    /// origin are dropped so a ray leaving a surface doesn't hit it at t = 0.
    pub fn raycast_all(&self, origin: Vec2, dir: Vec2) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = self
            .objects
            .iter()
            .filter_map(|object| {
                let (distance, outward) = ray_collider(origin, dir, &object.collider)?;
                let normal = if outward.dot(dir) > 0.0 {
                    -outward
                } else {
                    outward
                };
                Some(RayHit {
                    object: object.id,
                    distance,
                    point: origin + dir * distance,
                    normal,
                })
            })
            .collect();

        // Ties broken by id so iteration order stays stable frame to frame
        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.object.cmp(&b.object))
        });
        hits
    }
}

/// Nearest intersection distance and outward normal of a ray against a collider
fn ray_collider(origin: Vec2, dir: Vec2, collider: &Collider) -> Option<(f32, Vec2)> {
    match *collider {
        Collider::Segment { a, b } => ray_segment(origin, dir, a, b),
        Collider::Circle { center, radius } => ray_circle(origin, dir, center, radius),
    }
}

fn ray_segment(origin: Vec2, dir: Vec2, a: Vec2, b: Vec2) -> Option<(f32, Vec2)> {
    let edge = b - a;
    let denom = dir.perp_dot(edge);
    if denom.abs() < 1e-8 {
        return None; // Parallel (or degenerate segment)
    }

    let to_a = a - origin;
    let t = to_a.perp_dot(edge) / denom;
    let u = to_a.perp_dot(dir) / denom;

    if t > RAY_EPSILON && (0.0..=1.0).contains(&u) {
        Some((t, perp(edge).normalize()))
    } else {
        None
    }
}

fn ray_circle(origin: Vec2, dir: Vec2, center: Vec2, radius: f32) -> Option<(f32, Vec2)> {
    let oc = origin - center;
    let half_b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let discriminant = half_b * half_b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    // Entry point first, exit point if the origin is inside the circle
    let t = [-half_b - sqrt_d, -half_b + sqrt_d]
        .into_iter()
        .find(|&t| t > RAY_EPSILON)?;

    let point = origin + dir * t;
    Some((t, (point - center).normalize_or_zero()))
}
