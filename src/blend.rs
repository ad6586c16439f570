//! Blend driver: the progress scalar between Scattered (0) and Formed (1).

use bevy::prelude::*;

use crate::settings::TreeSettings;

/// Distance from the target below which progress snaps onto it.
const SNAP_EPSILON: f32 = 1e-4;

/// Session blend state.
///
/// Progress moves toward the target with exponential smoothing, so it never
/// overshoots and approaches the target monotonically.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct BlendDriver {
    progress: f32,
    formed: bool,
    /// Smoothing rate per second.
    pub rate: f32,
}

impl Default for BlendDriver {
    fn default() -> Self {
        Self::new(TreeSettings::default().blend_rate)
    }
}

impl BlendDriver {
    /// Start scattered with the given smoothing rate.
    pub fn new(rate: f32) -> Self {
        Self {
            progress: 0.0,
            formed: false,
            rate: rate.max(0.0),
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_formed(&self) -> bool {
        self.formed
    }

    /// Progress value the driver is heading to.
    pub fn target(&self) -> f32 {
        if self.formed { 1.0 } else { 0.0 }
    }

    /// Whether progress has reached its target.
    pub fn is_settled(&self) -> bool {
        self.progress == self.target()
    }

    pub fn set_formed(&mut self, formed: bool) {
        self.formed = formed;
    }

    pub fn toggle(&mut self) {
        self.formed = !self.formed;
    }

    /// Advance by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let target = self.target();
        let alpha = 1.0 - (-self.rate * dt).exp();

        self.progress += (target - self.progress) * alpha.clamp(0.0, 1.0);
        if (target - self.progress).abs() < SNAP_EPSILON {
            self.progress = target;
        }
        self.progress = self.progress.clamp(0.0, 1.0);
    }
}

pub struct BlendPlugin;

impl Plugin for BlendPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ToggleTreeEvent>()
            .init_resource::<BlendDriver>()
            .add_systems(Startup, apply_blend_rate)
            .add_systems(Update, (handle_toggle_events, advance_blend).chain());
    }
}

/// Flip between Formed and Scattered.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ToggleTreeEvent;

pub fn handle_toggle_events(mut events: MessageReader<ToggleTreeEvent>, mut blend: ResMut<BlendDriver>) {
    for _ in events.read() {
        blend.toggle();
        info!(
            "Tree: {}",
            if blend.is_formed() { "FORMING" } else { "SCATTERING" }
        );
    }
}

/// Pick up the configured smoothing rate.
pub fn apply_blend_rate(settings: Res<TreeSettings>, mut blend: ResMut<BlendDriver>) {
    blend.rate = settings.blend_rate.max(0.0);
}

/// Tick the driver once per frame.
pub fn advance_blend(time: Res<Time>, mut blend: ResMut<BlendDriver>) {
    if blend.is_settled() {
        return;
    }
    let dt = time.delta_secs();
    blend.tick(dt);
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f32 = 1.0 / 60.0;

    #[test]
    fn starts_scattered() {
        let blend = BlendDriver::default();
        assert_eq!(blend.progress(), 0.0);
        assert!(!blend.is_formed());
        assert!(blend.is_settled());
    }

    #[test]
    fn converges_monotonically_to_formed() {
        let mut blend = BlendDriver::new(2.5);
        blend.set_formed(true);

        let mut last = blend.progress();
        let mut ticks = 0;
        while (1.0 - blend.progress()) > 1e-3 {
            blend.tick(TICK);
            assert!(blend.progress() >= last, "progress decreased at tick {ticks}");
            assert!(blend.progress() <= 1.0);
            last = blend.progress();
            ticks += 1;
            assert!(ticks < 60 * 5, "did not converge within five seconds");
        }
        // ln(1000) / 2.5 is about 2.76 s
        assert!(ticks <= 170, "took {ticks} ticks");
    }

    #[test]
    fn snaps_onto_target() {
        let mut blend = BlendDriver::new(2.5);
        blend.set_formed(true);
        for _ in 0..600 {
            blend.tick(TICK);
        }
        assert_eq!(blend.progress(), 1.0);
        assert!(blend.is_settled());
    }

    #[test]
    fn huge_steps_never_overshoot() {
        let mut blend = BlendDriver::new(50.0);
        blend.set_formed(true);
        blend.tick(1_000.0);
        assert_eq!(blend.progress(), 1.0);

        blend.toggle();
        blend.tick(0.1);
        assert!(blend.progress() >= 0.0 && blend.progress() < 1.0);
    }

    #[test]
    fn converges_back_to_scattered() {
        let mut blend = BlendDriver::new(2.5);
        blend.set_formed(true);
        blend.tick(10.0);
        blend.set_formed(false);

        let mut last = blend.progress();
        for _ in 0..600 {
            blend.tick(TICK);
            assert!(blend.progress() <= last);
            last = blend.progress();
        }
        assert_eq!(blend.progress(), 0.0);
    }

    #[test]
    fn invalid_dt_is_ignored() {
        let mut blend = BlendDriver::new(2.5);
        blend.set_formed(true);
        blend.tick(-1.0);
        blend.tick(f32::NAN);
        blend.tick(f32::INFINITY);
        assert_eq!(blend.progress(), 0.0);
    }

    #[test]
    fn system_advances_with_time() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TreeSettings::default())
            .add_plugins(BlendPlugin);
        app.update();

        app.world_mut().resource_mut::<BlendDriver>().set_formed(true);
        for _ in 0..5 {
            std::thread::sleep(std::time::Duration::from_millis(5));
            app.update();
        }
        assert!(app.world().resource::<BlendDriver>().progress() > 0.0);
    }

    #[test]
    fn toggle_events_flip_the_target() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TreeSettings::default())
            .add_plugins(BlendPlugin);

        app.world_mut().write_message(ToggleTreeEvent);
        app.update();
        assert!(app.world().resource::<BlendDriver>().is_formed());

        app.world_mut().write_message(ToggleTreeEvent);
        app.update();
        assert!(!app.world().resource::<BlendDriver>().is_formed());
    }
}
