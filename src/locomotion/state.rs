//! Locomotion state
//!
//! Owns the integrated look angles, the per-axis translation flags and the
//! teleport trigger. Everything is driven by events and an explicit frame
//! clock supplied by the host.

use std::f32::consts::TAU;
use std::sync::mpsc::Receiver;

use glam::Vec2;

use super::input::{InputEvent, LocomotionEvent, SelectionEvent};
use super::orientation::Orientation;
use super::teleportation::{ArcTeleporter, Teleportation};
use super::timer::Timer;
use crate::clamp_pitch;
use crate::settings::Settings;
use crate::sim::SceneNode;

/// Pointer space used to scale look deltas into angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Dimensions are clamped to at least one unit
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

/// Head orientation, controller translation and the teleport trigger
#[derive(Debug)]
pub struct Locomotion<T: Teleportation = ArcTeleporter> {
    /// Translation speed (m/s)
    pub velocity: f32,
    /// Look sensitivity
    pub angular_velocity: f32,
    orientation: Orientation,
    current_rotation: Vec2,
    /// Pitch, clamped to [-π/2, π/2]
    phi: f32,
    /// Yaw, unbounded
    theta: f32,
    translation_enabled: bool,
    translating_z: Option<f32>,
    translating_x: Option<f32>,
    viewport: Viewport,
    cancel_teleportation: bool,
    hold_to_walk: Timer,
    hold_to_walk_delay: f64,
    /// Last frame time handed to `update`
    now: f64,
    teleportation: T,
}

impl Default for Locomotion<ArcTeleporter> {
    fn default() -> Self {
        Self::with_settings(&Settings::default())
    }
}

impl Locomotion<ArcTeleporter> {
    /// Locomotion with the stock arc teleporter
    pub fn with_settings(settings: &Settings) -> Self {
        Self::new(settings, ArcTeleporter::new(settings.teleport.clone()))
    }
}

impl<T: Teleportation> Locomotion<T> {
    /// Create locomotion around a teleport collaborator
    ///
    /// The look baseline starts at zero, so the first `orient` integrates the
    /// whole raw pointer sample. Send a `CurrentOrientation` event with the
    /// pointer's current position before the first `Orientation` event.
    pub fn new(settings: &Settings, teleportation: T) -> Self {
        Self {
            velocity: settings.velocity,
            angular_velocity: settings.angular_velocity,
            orientation: Orientation::default(),
            current_rotation: Vec2::ZERO,
            phi: 0.0,
            theta: 0.0,
            translation_enabled: true,
            translating_z: None,
            translating_x: None,
            viewport: Viewport::new(settings.viewport_width, settings.viewport_height),
            cancel_teleportation: false,
            hold_to_walk: Timer::new(),
            hold_to_walk_delay: settings.hold_to_walk_delay,
            now: 0.0,
            teleportation,
        }
    }

    // === Accessors ===

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn current_rotation(&self) -> Vec2 {
        self.current_rotation
    }

    pub fn translating_z(&self) -> Option<f32> {
        self.translating_z
    }

    pub fn translating_x(&self) -> Option<f32> {
        self.translating_x
    }

    pub fn is_translation_enabled(&self) -> bool {
        self.translation_enabled
    }

    pub fn is_cancel_pending(&self) -> bool {
        self.cancel_teleportation
    }

    pub fn is_walk_pending(&self) -> bool {
        self.hold_to_walk.is_pending()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn teleportation(&self) -> &T {
        &self.teleportation
    }

    pub fn teleportation_mut(&mut self) -> &mut T {
        &mut self.teleportation
    }

    /// Guide meshes to add to the host scene: ray curve, then hit marker
    pub fn meshes(&self) -> [&SceneNode; 2] {
        [self.teleportation.ray_curve(), self.teleportation.hit_marker()]
    }

    // === Orientation ===

    /// Integrate an absolute pointer sample into pitch and yaw
    ///
    /// Horizontal motion drives yaw, vertical motion drives pitch. A full
    /// viewport width turns the view by 2π at unit angular velocity. Any
    /// resolved teleport target is (re)confirmed while the view moves.
    pub fn orient(&mut self, rotation: Vec2) {
        let delta = rotation - self.current_rotation;
        self.current_rotation = rotation;

        self.phi = clamp_pitch(
            self.phi + TAU * delta.y / self.viewport.height * self.angular_velocity,
        );
        self.theta += TAU * delta.x / self.viewport.width * self.angular_velocity;
        self.orientation = Orientation::from_pitch_yaw(self.phi, self.theta);

        if self.teleportation.hit_point().is_some() {
            self.teleportation.activate_teleport(self.now);
        }
    }

    /// Move the look baseline without turning
    pub fn sync_rotation(&mut self, rotation: Vec2) {
        self.current_rotation = rotation;
    }

    // === Translation ===

    /// Start translating along Z at signed speed `v`
    pub fn translate_z(&mut self, v: f32) {
        if !self.translation_enabled {
            self.translating_z = None;
            return;
        }
        self.translating_z = Some(v);
    }

    /// Start translating along X at signed speed `v`
    ///
    /// While translation is disabled this clears the Z flag, not X; an X
    /// translation already in progress keeps going.
    pub fn translate_x(&mut self, v: f32) {
        if !self.translation_enabled {
            self.translating_z = None;
            return;
        }
        self.translating_x = Some(v);
    }

    pub fn stop_translate_z(&mut self) {
        self.translating_z = None;
    }

    pub fn stop_translate_x(&mut self) {
        self.translating_x = None;
    }

    /// Allow new translations; flags already set are left alone
    pub fn enable_translation(&mut self) {
        self.translation_enabled = true;
    }

    /// Refuse new translations; flags already set are left alone
    pub fn disable_translation(&mut self) {
        self.translation_enabled = false;
    }

    // === Teleport trigger ===

    /// Toggle aiming; a pending cancel wins over starting to aim
    pub fn teleport(&mut self) {
        if self.teleportation.is_ray_curve_active() || self.cancel_teleportation {
            self.cancel_teleportation = false;
            self.teleportation.reset_teleport();
        } else {
            self.teleportation.set_ray_curve_state(true);
        }
    }

    // === Event dispatch ===

    /// Apply one controller event
    ///
    /// Timers armed here use the clock from the last `pump_events` or
    /// `update` call.
    pub fn handle_event(&mut self, event: LocomotionEvent) {
        match event {
            LocomotionEvent::ZTranslationStart { direction } => {
                self.translate_z(direction * self.velocity)
            }
            LocomotionEvent::XTranslationStart { direction } => {
                self.translate_x(direction * self.velocity)
            }
            LocomotionEvent::ZTranslationEnd => self.stop_translate_z(),
            LocomotionEvent::XTranslationEnd => self.stop_translate_x(),
            LocomotionEvent::Orientation { rotation } => self.orient(rotation),
            LocomotionEvent::CurrentOrientation { rotation } => self.sync_rotation(rotation),
            LocomotionEvent::TriggerPressed { touch } => {
                if !touch {
                    self.hold_to_walk.cancel();
                    self.teleport();
                }
            }
            LocomotionEvent::ThumbpadPressed => {
                self.hold_to_walk.cancel();
                self.teleport();
                if !self.teleportation.is_ray_curve_active() {
                    self.stop_translate_z();
                }
            }
            LocomotionEvent::ThumbpadTouched => {
                if !self.teleportation.is_ray_curve_active() {
                    self.hold_to_walk.schedule(self.now, self.hold_to_walk_delay);
                }
            }
            LocomotionEvent::ThumbpadUntouched => {
                self.hold_to_walk.cancel();
                self.stop_translate_z();
            }
        }
    }

    pub fn handle_selection(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::Selected => {
                if self.teleportation.is_ray_curve_active() {
                    self.teleportation.reset_teleport();
                } else {
                    self.cancel_teleportation = true;
                }
            }
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Controller(event) => self.handle_event(event),
            InputEvent::Selection(event) => self.handle_selection(event),
        }
    }

    /// Drain every queued event without blocking, stamping them with `now`
    pub fn pump_events(&mut self, events: &Receiver<InputEvent>, now: f64) -> usize {
        self.now = now;
        let mut handled = 0;
        while let Ok(event) = events.try_recv() {
            self.handle_input(event);
            handled += 1;
        }
        handled
    }

    /// Advance the frame clock and fire the hold-to-walk timer when due
    pub fn update(&mut self, now: f64) {
        self.now = now;
        if self.hold_to_walk.poll(now) {
            log::debug!("Hold to walk");
            self.translate_z(-self.velocity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Ray;
    use glam::Vec3;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};
    use std::sync::mpsc;

    /// Teleporter that records calls and holds whatever state tests give it
    #[derive(Debug)]
    struct RecordingTeleporter {
        ray_curve: SceneNode,
        hit_marker: SceneNode,
        hit_point: Option<Vec3>,
        ray_curve_active: bool,
        calls: Vec<&'static str>,
    }

    impl Default for RecordingTeleporter {
        fn default() -> Self {
            Self {
                ray_curve: SceneNode::group(10, "curve"),
                hit_marker: SceneNode::group(11, "marker"),
                hit_point: None,
                ray_curve_active: false,
                calls: Vec::new(),
            }
        }
    }

    impl Teleportation for RecordingTeleporter {
        fn ray_curve(&self) -> &SceneNode {
            &self.ray_curve
        }
        fn hit_marker(&self) -> &SceneNode {
            &self.hit_marker
        }
        fn hit_point(&self) -> Option<Vec3> {
            self.hit_point
        }
        fn is_ray_curve_active(&self) -> bool {
            self.ray_curve_active
        }
        fn is_teleport_active(&self) -> bool {
            false
        }
        fn activate_teleport(&mut self, _now: f64) {
            self.calls.push("activate");
        }
        fn reset_teleport(&mut self) {
            self.calls.push("reset");
            self.ray_curve_active = false;
            self.hit_point = None;
        }
        fn set_ray_curve_state(&mut self, active: bool) {
            self.calls.push(if active { "aim" } else { "unaim" });
            self.ray_curve_active = active;
        }
        fn update_ray_curve(&mut self, _aim: &Ray, _world: &[SceneNode], _now: f64) {}
    }

    fn settings_1000() -> Settings {
        Settings {
            viewport_width: 1000.0,
            viewport_height: 1000.0,
            ..Settings::default()
        }
    }

    fn locomotion() -> Locomotion<RecordingTeleporter> {
        Locomotion::new(&settings_1000(), RecordingTeleporter::default())
    }

    #[test]
    fn test_defaults() {
        let loco = Locomotion::<ArcTeleporter>::default();
        assert_eq!(loco.velocity, 2.0);
        assert_eq!(loco.angular_velocity, 1.0);
        assert_eq!(loco.current_rotation(), Vec2::ZERO);
        assert!(loco.is_translation_enabled());
        assert_eq!(loco.translating_z(), None);
        assert_eq!(loco.translating_x(), None);
        assert_eq!(loco.orientation().quaternion, glam::Quat::IDENTITY);
    }

    #[test]
    fn test_half_width_is_half_turn() {
        let mut loco = locomotion();
        loco.orient(Vec2::new(500.0, 0.0));
        assert!((loco.theta() - PI).abs() < 1e-6);
        assert_eq!(loco.phi(), 0.0);
        assert_eq!(loco.current_rotation(), Vec2::new(500.0, 0.0));
    }

    #[test]
    fn test_vertical_drives_pitch() {
        let mut loco = locomotion();
        loco.orient(Vec2::new(0.0, 100.0));
        assert!((loco.phi() - TAU * 0.1).abs() < 1e-6);
        assert_eq!(loco.theta(), 0.0);
        assert_eq!(loco.orientation().euler.x, loco.phi());
    }

    #[test]
    fn test_pitch_saturates() {
        let mut loco = locomotion();
        loco.orient(Vec2::new(0.0, 900.0));
        assert_eq!(loco.phi(), FRAC_PI_2);
        loco.orient(Vec2::new(0.0, -2000.0));
        assert_eq!(loco.phi(), -FRAC_PI_2);
    }

    #[test]
    fn test_sync_prevents_jump() {
        let mut loco = locomotion();
        loco.handle_event(LocomotionEvent::CurrentOrientation {
            rotation: Vec2::new(640.0, 360.0),
        });
        loco.handle_event(LocomotionEvent::Orientation {
            rotation: Vec2::new(650.0, 360.0),
        });
        assert!((loco.theta() - TAU * 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_angular_velocity_scales() {
        let mut loco = locomotion();
        loco.angular_velocity = 0.5;
        loco.orient(Vec2::new(500.0, 0.0));
        assert!((loco.theta() - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_orient_activates_teleport_only_with_hit() {
        let mut loco = locomotion();
        loco.orient(Vec2::new(1.0, 0.0));
        assert!(loco.teleportation().calls.is_empty());

        loco.teleportation_mut().hit_point = Some(Vec3::new(0.0, 0.0, -3.0));
        loco.orient(Vec2::new(2.0, 0.0));
        loco.orient(Vec2::new(3.0, 0.0));
        assert_eq!(loco.teleportation().calls, vec!["activate", "activate"]);
    }

    #[test]
    fn test_translate_z() {
        let mut loco = locomotion();
        loco.translate_z(2.0);
        assert_eq!(loco.translating_z(), Some(2.0));
        loco.disable_translation();
        loco.translate_z(2.0);
        assert_eq!(loco.translating_z(), None);
    }

    #[test]
    fn test_disabled_translate_x_clears_z() {
        let mut loco = locomotion();
        loco.translate_z(1.0);
        loco.translate_x(1.5);
        loco.disable_translation();
        loco.translate_x(3.0);
        assert_eq!(loco.translating_z(), None);
        assert_eq!(loco.translating_x(), Some(1.5));
    }

    #[test]
    fn test_toggle_keeps_flags() {
        let mut loco = locomotion();
        loco.translate_x(-1.0);
        loco.disable_translation();
        assert_eq!(loco.translating_x(), Some(-1.0));
        loco.enable_translation();
        loco.translate_z(4.0);
        assert_eq!(loco.translating_z(), Some(4.0));
    }

    #[test]
    fn test_stop_while_disabled() {
        let mut loco = locomotion();
        loco.translate_z(1.0);
        loco.translate_x(1.0);
        loco.disable_translation();
        loco.stop_translate_z();
        loco.stop_translate_x();
        assert_eq!(loco.translating_z(), None);
        assert_eq!(loco.translating_x(), None);
    }

    #[test]
    fn test_translation_events_scale_by_velocity() {
        let mut loco = locomotion();
        loco.handle_event(LocomotionEvent::ZTranslationStart { direction: -1.0 });
        loco.handle_event(LocomotionEvent::XTranslationStart { direction: 0.5 });
        assert_eq!(loco.translating_z(), Some(-2.0));
        assert_eq!(loco.translating_x(), Some(1.0));
        loco.handle_event(LocomotionEvent::ZTranslationEnd);
        loco.handle_event(LocomotionEvent::XTranslationEnd);
        assert_eq!(loco.translating_z(), None);
        assert_eq!(loco.translating_x(), None);
    }

    #[test]
    fn test_teleport_toggles() {
        let mut loco = locomotion();
        loco.teleport();
        assert!(loco.teleportation().is_ray_curve_active());
        loco.teleport();
        assert!(!loco.teleportation().is_ray_curve_active());
        assert_eq!(loco.teleportation().calls, vec!["aim", "reset"]);
    }

    #[test]
    fn test_selected_while_aiming_resets() {
        let mut loco = locomotion();
        loco.teleport();
        loco.handle_selection(SelectionEvent::Selected);
        assert!(!loco.teleportation().is_ray_curve_active());
        assert!(!loco.is_cancel_pending());
    }

    #[test]
    fn test_selected_while_idle_cancels_next_teleport() {
        let mut loco = locomotion();
        loco.handle_selection(SelectionEvent::Selected);
        assert!(loco.is_cancel_pending());
        loco.teleport();
        assert!(!loco.teleportation().is_ray_curve_active());
        assert!(!loco.is_cancel_pending());
        assert_eq!(loco.teleportation().calls, vec!["reset"]);
        loco.teleport();
        assert!(loco.teleportation().is_ray_curve_active());
    }

    #[test]
    fn test_trigger_touch_ignored() {
        let mut loco = locomotion();
        loco.handle_event(LocomotionEvent::TriggerPressed { touch: true });
        assert!(!loco.teleportation().is_ray_curve_active());
        loco.handle_event(LocomotionEvent::TriggerPressed { touch: false });
        assert!(loco.teleportation().is_ray_curve_active());
    }

    #[test]
    fn test_hold_to_walk() {
        let mut loco = locomotion();
        loco.update(1.0);
        loco.handle_event(LocomotionEvent::ThumbpadTouched);
        assert!(loco.is_walk_pending());

        loco.update(1.3);
        assert_eq!(loco.translating_z(), None);
        loco.update(1.6);
        assert_eq!(loco.translating_z(), Some(-loco.velocity));

        loco.handle_event(LocomotionEvent::ThumbpadUntouched);
        assert_eq!(loco.translating_z(), None);
    }

    #[test]
    fn test_release_cancels_walk() {
        let mut loco = locomotion();
        loco.handle_event(LocomotionEvent::ThumbpadTouched);
        loco.update(0.2);
        loco.handle_event(LocomotionEvent::ThumbpadUntouched);
        loco.update(5.0);
        assert_eq!(loco.translating_z(), None);
        assert!(!loco.is_walk_pending());
    }

    #[test]
    fn test_touch_while_aiming_does_not_walk() {
        let mut loco = locomotion();
        loco.teleport();
        loco.handle_event(LocomotionEvent::ThumbpadTouched);
        assert!(!loco.is_walk_pending());
    }

    #[test]
    fn test_thumbpad_press_toggles_and_stops_walk() {
        let mut loco = locomotion();
        loco.handle_event(LocomotionEvent::ThumbpadTouched);
        loco.handle_event(LocomotionEvent::ThumbpadPressed);
        assert!(loco.teleportation().is_ray_curve_active());
        // Explicit teleport drops the pending walk
        assert!(!loco.is_walk_pending());
        loco.update(1.0);
        assert_eq!(loco.translating_z(), None);

        loco.handle_event(LocomotionEvent::ThumbpadPressed);
        assert!(!loco.teleportation().is_ray_curve_active());
        assert!(!loco.is_walk_pending());
        assert_eq!(loco.translating_z(), None);
    }

    #[test]
    fn test_pump_events() {
        let mut loco = locomotion();
        let (tx, rx) = mpsc::channel::<InputEvent>();
        tx.send(LocomotionEvent::ZTranslationStart { direction: 1.0 }.into())
            .unwrap();
        tx.send(SelectionEvent::Selected.into()).unwrap();
        assert_eq!(loco.pump_events(&rx, 0.0), 2);
        assert_eq!(loco.translating_z(), Some(2.0));
        assert!(loco.is_cancel_pending());
        assert_eq!(loco.pump_events(&rx, 0.0), 0);
    }

    #[test]
    fn test_trigger_teleport_cancels_walk() {
        let mut loco = locomotion();
        loco.handle_event(LocomotionEvent::ThumbpadTouched);
        loco.handle_event(LocomotionEvent::TriggerPressed { touch: false });
        assert!(loco.teleportation().is_ray_curve_active());
        assert!(!loco.is_walk_pending());
        loco.update(1.0);
        assert_eq!(loco.translating_z(), None);
    }

    #[test]
    fn test_trigger_touch_keeps_walk() {
        let mut loco = locomotion();
        loco.handle_event(LocomotionEvent::ThumbpadTouched);
        loco.handle_event(LocomotionEvent::TriggerPressed { touch: true });
        assert!(loco.is_walk_pending());
    }

    #[test]
    fn test_pumped_events_use_frame_time() {
        let mut loco = locomotion();
        let (tx, rx) = mpsc::channel::<InputEvent>();
        tx.send(LocomotionEvent::ThumbpadTouched.into()).unwrap();
        // No update before the events arrive
        loco.pump_events(&rx, 2.0);
        loco.update(2.3);
        assert_eq!(loco.translating_z(), None);
        loco.update(2.5);
        assert_eq!(loco.translating_z(), Some(-loco.velocity));
    }

    #[test]
    fn test_meshes_order() {
        let loco = locomotion();
        let [curve, marker] = loco.meshes();
        assert_eq!(curve.id, 10);
        assert_eq!(marker.id, 11);
    }

    #[test]
    fn test_zero_viewport_clamped() {
        let mut loco = locomotion();
        loco.set_viewport(0.0, -5.0);
        loco.orient(Vec2::new(1.0, 1.0));
        assert!(loco.theta().is_finite());
        assert!(loco.phi().is_finite());
    }

    proptest! {
        #[test]
        fn prop_pitch_stays_clamped(samples in prop::collection::vec((-5000.0f32..5000.0, -5000.0f32..5000.0), 1..32)) {
            let mut loco = locomotion();
            for (x, y) in samples {
                loco.orient(Vec2::new(x, y));
                prop_assert!(loco.phi() >= -FRAC_PI_2 && loco.phi() <= FRAC_PI_2);
            }
        }

        #[test]
        fn prop_yaw_split_matches_single(a in -2000.0f32..2000.0, b in -2000.0f32..2000.0) {
            let mut split = locomotion();
            split.orient(Vec2::new(a, 0.0));
            split.orient(Vec2::new(b, 0.0));

            let mut single = locomotion();
            single.orient(Vec2::new(b, 0.0));

            prop_assert!((split.theta() - single.theta()).abs() < 1e-3);
        }
    }
}
