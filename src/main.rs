//! VR locomotion headless demo
//!
//! Builds a seeded obstacle field, plays a scripted controller session
//! through the input channel and steps the player at a fixed rate.

use std::sync::mpsc;

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use vr_locomotion::consts::*;
use vr_locomotion::locomotion::{InputEvent, Locomotion, LocomotionEvent, SelectionEvent, Teleportation};
use vr_locomotion::renderer::vertex::colors;
use vr_locomotion::renderer::{triangle_list, vertex_bytes};
use vr_locomotion::settings::Settings;
use vr_locomotion::sim::{Geometry, Ray, SceneNode, step_frame};

/// Seconds of simulated session
const SESSION_SECS: f64 = 9.0;
/// Eye height above the collider center
const EYE_OFFSET: f32 = 0.75;
const OBSTACLE_COUNT: u32 = 24;
const SEED: u64 = 0x5eed;

/// Floor plus randomly placed boxes; some low enough to step over
fn obstacle_field(rng: &mut Pcg32) -> Vec<SceneNode> {
    let mut world = vec![SceneNode::mesh(1, "floor", Geometry::plane(60.0, 60.0))];
    for i in 0..OBSTACLE_COUNT {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let distance = rng.random_range(3.0..15.0);
        let size = Vec3::new(
            rng.random_range(0.5..3.0),
            rng.random_range(0.1..2.5),
            rng.random_range(0.5..3.0),
        );
        let position = Vec3::new(angle.cos() * distance, size.y * 0.5, angle.sin() * distance);
        world.push(
            SceneNode::mesh(i + 2, format!("box_{}", i), Geometry::cuboid(size.x, size.y, size.z))
                .with_position(position),
        );
    }
    world
}

/// Scripted controller input, by time
fn script(viewport: Vec2) -> Vec<(f64, InputEvent)> {
    let center = viewport * 0.5;
    let mut events: Vec<(f64, InputEvent)> = vec![
        (0.0, LocomotionEvent::CurrentOrientation { rotation: center }.into()),
        (0.2, LocomotionEvent::ZTranslationStart { direction: -1.0 }.into()),
        (2.5, LocomotionEvent::XTranslationStart { direction: 0.5 }.into()),
        (3.0, LocomotionEvent::ZTranslationEnd.into()),
        (3.0, LocomotionEvent::XTranslationEnd.into()),
        (3.2, LocomotionEvent::TriggerPressed { touch: false }.into()),
        (5.0, LocomotionEvent::ThumbpadTouched.into()),
        (6.5, LocomotionEvent::ThumbpadUntouched.into()),
        (7.0, SelectionEvent::Selected.into()),
        (7.2, LocomotionEvent::TriggerPressed { touch: false }.into()),
    ];

    // Sweep the view right, then nudge it while aiming so the target confirms
    for i in 0..60 {
        let t = 1.0 + i as f64 / 60.0;
        let x = center.x + i as f32 * 4.0;
        events.push((t, LocomotionEvent::Orientation { rotation: Vec2::new(x, center.y) }.into()));
    }
    let aimed = Vec2::new(center.x + 236.0, center.y + 40.0);
    events.push((3.4, LocomotionEvent::Orientation { rotation: aimed }.into()));

    events.sort_by(|a, b| a.0.total_cmp(&b.0));
    events
}

fn main() {
    env_logger::init();
    log::info!("VR locomotion demo starting...");

    let settings = Settings::default();
    let mut rng = Pcg32::seed_from_u64(SEED);
    let world = obstacle_field(&mut rng);
    log::info!("Obstacle field: {} nodes", world.len());

    let mut locomotion = Locomotion::with_settings(&settings);
    let mut player = SceneNode::mesh(
        0,
        "player",
        Geometry::cuboid(0.5, settings.player_height, 0.5),
    )
    .with_position(Vec3::new(0.0, settings.player_height * 0.5, 0.0));

    let (tx, rx) = mpsc::channel::<InputEvent>();
    let viewport = Vec2::new(settings.viewport_width, settings.viewport_height);
    let mut pending = script(viewport).into_iter().peekable();

    let dt = SIM_DT as f64;
    let frames = (SESSION_SECS / dt).ceil() as u64;
    let mut blocked_frames = 0u32;

    for frame in 0..frames {
        let now = frame as f64 * dt;

        // Deliver whatever the controller layer would have emitted by now
        while let Some((_, event)) = pending.next_if(|(t, _)| *t <= now) {
            if tx.send(event).is_err() {
                log::warn!("Input channel closed");
            }
        }
        locomotion.pump_events(&rx, now);

        let eye = player.position + Vec3::Y * EYE_OFFSET;
        let aim = Ray::new(eye, locomotion.orientation().quaternion * Vec3::new(0.0, 0.15, -1.0));
        let report = step_frame(
            &mut locomotion,
            &mut player,
            &world,
            &aim,
            SIM_DT,
            now,
            settings.collision_height_threshold,
        );

        if report.blocked.is_some() {
            blocked_frames += 1;
        }
        if let Some(destination) = report.teleported_to {
            log::info!("Frame {}: teleported to {:?}", frame, destination);
        }
        if frame % 90 == 0 {
            log::info!(
                "t={:.2}s pos={:?} yaw={:.3} pitch={:.3}",
                now,
                player.position,
                locomotion.theta().rem_euclid(std::f32::consts::TAU),
                locomotion.phi()
            );
        }
    }

    // Guide meshes as the renderer would upload them, in world space
    let teleportation = locomotion.teleportation();
    let curve_color = if teleportation.hit_point().is_some() {
        colors::RAY_CURVE
    } else {
        colors::RAY_CURVE_INVALID
    };
    let [ray_curve, hit_marker] = locomotion.meshes();
    let mut vertices = Vec::new();
    for (node, color) in [(ray_curve, curve_color), (hit_marker, colors::HIT_MARKER)] {
        if let Some(geometry) = node.geometry.as_ref().filter(|_| node.visible) {
            vertices.extend(triangle_list(&geometry.transformed(&node.matrix()), color));
        }
    }

    log::info!(
        "Session done: pos={:?}, {} blocked frames, {} guide bytes",
        player.position,
        blocked_frames,
        vertex_bytes(&vertices).len()
    );
}
