//! Beam Gates demo driver
//!
//! Builds a small gate layout, sweeps the emitter across it and logs what the
//! beam does each second of simulated time.

use beam_gates::BeamSettings;
use beam_gates::consts::SIM_DT;
use beam_gates::renderer::build_mesh;
use beam_gates::sim::{
    BeamState, Collider, EmitterPose, GateKind, ObjectRole, Scene, TickInput, tick,
};
use glam::Vec2;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Simulated seconds the demo sweep runs for
const DEMO_SECONDS: u32 = 4;

fn demo_scene() -> Scene {
    let mut scene = Scene::new();

    // Arena walls absorb the beam
    let half = 400.0;
    let corners = [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ];
    for i in 0..corners.len() {
        scene.add(
            Collider::Segment {
                a: corners[i],
                b: corners[(i + 1) % corners.len()],
            },
            ObjectRole::Boundary,
        );
    }

    scene.add_gate(
        Collider::Segment {
            a: Vec2::new(200.0, -80.0),
            b: Vec2::new(260.0, 80.0),
        },
        GateKind::Mirror,
    );
    scene.add_gate(
        Collider::Circle {
            center: Vec2::new(120.0, 0.0),
            radius: 24.0,
        },
        GateKind::ConvergingLens,
    );
    scene.add_gate(
        Collider::Segment {
            a: Vec2::new(-60.0, 180.0),
            b: Vec2::new(60.0, 180.0),
        },
        GateKind::diffraction(3),
    );
    scene.add_gate(
        Collider::Circle {
            center: Vec2::new(-150.0, -150.0),
            radius: 30.0,
        },
        GateKind::DivergingLens,
    );

    // An enemy: transparent to the beam, takes damage from it
    scene.add(
        Collider::Circle {
            center: Vec2::new(0.0, 300.0),
            radius: 16.0,
        },
        ObjectRole::Solid,
    );

    scene
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings() -> BeamSettings {
    let Some(path) = std::env::args().nth(1) else {
        return BeamSettings::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match BeamSettings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path, e);
                BeamSettings::default()
            }
        },
        Err(e) => {
            log::warn!("Couldn't read {}: {}", path, e);
            BeamSettings::default()
        }
    }
}

fn run_demo(settings: BeamSettings) {
    let scene = demo_scene();
    let mut state = BeamState::new(settings);
    let enemy = Vec2::new(0.0, 300.0);

    let ticks_per_second = (1.0 / SIM_DT).round() as u32;
    let total_ticks = ticks_per_second * DEMO_SECONDS;

    for t in 0..total_ticks {
        // Sweep a full turn over the run
        let angle = t as f32 / total_ticks as f32 * std::f32::consts::TAU;
        let input = TickInput {
            emitter: Some(EmitterPose::new(Vec2::ZERO, Vec2::from_angle(angle))),
        };
        tick(&mut state, &scene, &input, SIM_DT);

        if t % ticks_per_second == 0 {
            let vertices = build_mesh(state.primitives());
            let stats = state.last_stats();
            log::info!(
                "t={:.1}s aim={:.0}° segments={} primitives={} vertices={} enemy_dps={}{}",
                t as f32 * SIM_DT,
                angle.to_degrees(),
                state.segments().len(),
                state.primitives().len(),
                vertices.len(),
                state.damage_rate_at(enemy, 16.0),
                if stats.truncated { " (truncated)" } else { "" }
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Beam Gates (web) starting...");
    run_demo(BeamSettings::default());
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Beam Gates (native) starting...");
    run_demo(load_settings());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
