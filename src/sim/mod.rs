//! Beam simulation module
//!
//! Everything that decides where the beam goes and how strong it is:
//! - Single-threaded, runs inside one fixed physics step
//! - Scene is read-only during a trace
//! - Stable emission order (depth-first, continuation before side branches)

pub mod gate;
pub mod scanner;
pub mod scene;
pub mod segment;
pub mod tick;
pub mod tracer;

pub use gate::{Branch, DIFFRACTION_ANGLES, Gate, GateKind};
pub use scanner::{Hit, scan};
pub use scene::{Collider, ObjectId, ObjectRole, RayHit, Scene, SceneObject};
pub use segment::BeamSegment;
pub use tick::{BeamState, EmitterPose, TickInput, tick};
pub use tracer::{BeamRay, TraceContext, TraceStats, trace};
