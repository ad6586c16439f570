//! Position blending between the scattered and formed configurations.

use bevy::prelude::*;

/// Fraction of the progress range used to stagger items by their seed.
const STAGGER: f32 = 0.3;

/// Smoothstep easing on `[0, 1]`.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Displayed position for an item at global `progress`.
///
/// Each item starts moving after a delay proportional to `seed`, so the cloud
/// assembles as a wave. The endpoints are exact: progress 0 yields
/// `scattered`, progress 1 yields `formed`.
pub fn blend_position(scattered: Vec3, formed: Vec3, progress: f32, seed: f32) -> Vec3 {
    let delay = seed.clamp(0.0, 1.0) * STAGGER;
    let local = (progress - delay) / (1.0 - STAGGER);
    let t = ease_in_out(local);

    if t <= 0.0 {
        scattered
    } else if t >= 1.0 {
        formed
    } else {
        scattered.lerp(formed, t)
    }
}
