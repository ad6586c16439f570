//! Centralized constants for the scene
//!
//! Palette colors, light settings and the fixed strings used by the wish
//! panel live here so the look stays consistent across modules.

use bevy::prelude::*;

/// Emerald and gold palette
pub mod palette {
    use super::*;

    /// Clear color behind the tree
    pub const BACKGROUND: Color = Color::srgb(0.004, 0.02, 0.015);

    /// Needle particle colors (HDR values so bloom picks them up)
    pub const NEEDLE_EMERALD: Color = Color::srgb(0.05, 0.9, 0.45);
    pub const NEEDLE_GOLD: Color = Color::srgb(1.0, 0.78, 0.3);
    /// Emissive boost applied to needle colors
    pub const NEEDLE_EMISSIVE_STRENGTH: f32 = 4.0;
    /// Share of particles drawn in gold (by seed)
    pub const GOLD_SHARE: f32 = 0.25;

    /// Ornament base colors
    pub const BAUBLE: Color = Color::srgb(0.75, 0.05, 0.12);
    pub const GIFT: Color = Color::srgb(0.95, 0.8, 0.4);
    pub const GEM: Color = Color::srgb(0.2, 0.85, 0.7);

    /// Star topper
    pub const STAR: Color = Color::srgb(1.0, 0.85, 0.45);
    pub const STAR_EMISSIVE_STRENGTH: f32 = 12.0;
}

/// Decorative lighting
pub mod lights {
    use super::*;

    pub const KEY_COLOR: Color = Color::srgb(1.0, 0.85, 0.6);
    pub const KEY_INTENSITY: f32 = 2_000_000.0;
    pub const KEY_POSITION: Vec3 = Vec3::new(8.0, 10.0, 12.0);

    pub const RIM_COLOR: Color = Color::srgb(0.4, 0.9, 0.75);
    pub const RIM_INTENSITY: f32 = 3_000_000.0;
    pub const RIM_POSITION: Vec3 = Vec3::new(-10.0, 6.0, -12.0);

    pub const AMBIENT_COLOR: Color = Color::srgb(0.3, 0.45, 0.4);
    pub const AMBIENT_BRIGHTNESS: f32 = 80.0;
}

/// Mesh and camera sizes
pub mod sizes {
    /// Radius of a needle particle before its size factor is applied
    pub const PARTICLE_RADIUS: f32 = 0.045;
    /// Relative amplitude of the needle twinkle
    pub const TWINKLE_AMPLITUDE: f32 = 0.35;
    /// Relative amplitude of the ornament bob
    pub const ORNAMENT_BOB: f32 = 0.08;
    /// Star topper radius
    pub const STAR_RADIUS: f32 = 0.45;
    /// Camera orbit distance from the trunk
    pub const CAMERA_DISTANCE: f32 = 24.0;
    /// Camera height above the origin
    pub const CAMERA_HEIGHT: f32 = 3.0;
}

/// Fixed strings for the wish panel
pub mod wish_text {
    /// Shown when no API credential is configured
    pub const MISSING_KEY: &str = "Experience the magic of the holidays. (API Key missing)";
    /// Shown when the generation call fails for any reason
    pub const FALLBACK: &str = "May elegance guide your way into the New Year.";
    /// Used in the prompt when the input is empty
    pub const DEFAULT_INTEREST: &str = "timeless elegance";
    /// Prompt prefix, followed by the interest
    pub const PROMPT_PREFIX: &str = "Create a luxurious, magical holiday wish for someone who loves: ";
    /// System instruction sent with every request
    pub const SYSTEM_INSTRUCTION: &str = "You are a poetic concierge for a luxury holiday house. \
        Reply with exactly one short, elegant sentence of at most 25 words. \
        Evoke gold, emerald and starlight. No quotation marks, no emoji.";
}
