//! Gate types and their beam transformation rules
//!
//! A gate is a placed optical element. Each kind maps an incoming beam (direction,
//! surface normal, power) to zero or more outgoing branches. The rules are pure so
//! the tracer stays kind-agnostic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_DIFFRACTION_LEVEL;
use crate::{reflect, rotate_deg};

/// Branch angles (degrees) per diffraction level; level `n` uses row `n - 1`
pub const DIFFRACTION_ANGLES: [&[f32]; MAX_DIFFRACTION_LEVEL as usize] = [
    &[30.0],
    &[20.0, 45.0],
    &[15.0, 30.0, 50.0],
    &[12.0, 24.0, 38.0, 55.0],
    &[10.0, 20.0, 32.0, 45.0, 60.0],
];

/// Gate kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GateKind {
    Mirror,
    /// Currently absorbs the beam from both sides
    OneWayMirror,
    Diffraction { level: u8 },
    ConvergingLens,
    DivergingLens,
    /// A kind name this build doesn't know about (data authored for a newer build)
    #[serde(other)]
    Unsupported,
}

impl GateKind {
    /// Diffraction gate with its level clamped to the supported tables
    pub fn diffraction(level: u8) -> Self {
        GateKind::Diffraction {
            level: clamp_level(level),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateKind::Mirror => "Mirror",
            GateKind::OneWayMirror => "OneWayMirror",
            GateKind::Diffraction { .. } => "Diffraction",
            GateKind::ConvergingLens => "ConvergingLens",
            GateKind::DivergingLens => "DivergingLens",
            GateKind::Unsupported => "Unsupported",
        }
    }

    /// Outgoing branches for a beam arriving along `dir` with `power`.
    ///
    /// `normal` is the unit surface normal at the hit point (either orientation).
    /// Branches are returned in emission order: the straight or reflected
    /// continuation first, then diffraction pairs, left rotation before right.
    /// An empty result ends the beam.
    pub fn branches(&self, dir: Vec2, normal: Vec2, power: u32) -> Vec<Branch> {
        match *self {
            GateKind::Mirror => vec![Branch {
                dir: reflect(dir, normal).normalize_or_zero(),
                power,
            }],
            GateKind::DivergingLens => vec![Branch {
                dir,
                power: diverge(power),
            }],
            GateKind::ConvergingLens => vec![Branch {
                dir,
                power: converge(power),
            }],
            GateKind::Diffraction { level } => diffract(dir, normal, power, level),
            GateKind::OneWayMirror | GateKind::Unsupported => Vec::new(),
        }
    }
}

/// An outgoing beam direction and power leaving a gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub dir: Vec2,
    pub power: u32,
}

/// A gate placed in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    pub kind: GateKind,
}

impl Gate {
    pub fn new(kind: GateKind) -> Self {
        let kind = match kind {
            GateKind::Diffraction { level } => GateKind::diffraction(level),
            other => other,
        };
        Self { kind }
    }

    /// Diffraction level (1 for non-diffraction gates)
    pub fn level(&self) -> u8 {
        match self.kind {
            GateKind::Diffraction { level } => clamp_level(level),
            _ => 1,
        }
    }
}

#[inline]
fn clamp_level(level: u8) -> u8 {
    level.clamp(1, MAX_DIFFRACTION_LEVEL)
}

/// Diverging lens power loss (floor halving)
#[inline]
pub fn diverge(power: u32) -> u32 {
    power >> 1
}

/// Converging lens power gain (doubling, saturating at the top of the range)
#[inline]
pub fn converge(power: u32) -> u32 {
    power.saturating_mul(2)
}

/// Whether two directions lie on the same side of the surface
#[inline]
pub fn same_side(a: Vec2, b: Vec2, normal: Vec2) -> bool {
    (a.dot(normal) >= 0.0) == (b.dot(normal) >= 0.0)
}

fn diffract(dir: Vec2, normal: Vec2, power: u32, level: u8) -> Vec<Branch> {
    let angles = DIFFRACTION_ANGLES[clamp_level(level) as usize - 1];

    let mut out = Vec::with_capacity(1 + angles.len() * 2);
    out.push(Branch { dir, power });

    // Attenuation accumulates across the loop: pair i carries power >> (i + 1)
    let mut branch_power = power;
    for &angle in angles {
        branch_power = diverge(branch_power);
        for candidate in [rotate_deg(dir, angle), rotate_deg(dir, -angle)] {
            if same_side(candidate, dir, normal) {
                out.push(Branch {
                    dir: candidate,
                    power: branch_power,
                });
            }
        }
    }

    out
}
