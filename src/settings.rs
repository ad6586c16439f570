use bevy::prelude::*;
use bevy_tree_geometry::{Sampler, TreeShape};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable holding the text-generation API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Application settings that persist to disk
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TreeSettings {
    /// Number of needle particles
    pub particle_count: usize,
    /// Number of ornaments
    pub ornament_count: usize,
    /// Exponential smoothing rate of the blend, per second
    pub blend_rate: f32,
    /// Camera orbit speed in radians per second (0 = still)
    pub orbit_speed: f32,
    /// UI scale factor (1.0 = default)
    pub ui_scale: f32,
    /// Text-generation model name
    pub model: String,
    /// Fixed generation seed, random layout when unset
    pub seed: Option<u64>,
    /// Tree and scatter shell dimensions
    pub shape: TreeShape,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            particle_count: 6_000,
            ornament_count: 240,
            blend_rate: 2.5,
            orbit_speed: 0.08,
            ui_scale: 1.0,
            model: "gemini-2.5-flash".to_string(),
            seed: None,
            shape: TreeShape::default(),
        }
    }
}

impl TreeSettings {
    /// Get the settings file path
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("bevy_holiday_tree");
            p.push("settings.ron");
            p
        })
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse RON settings, falling back to defaults on malformed input
    pub fn parse(content: &str) -> Self {
        match ron::from_str(content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring malformed settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) {
        let Some(path) = Self::file_path() else {
            error!("Could not determine config directory");
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {}", e);
                return;
            }
        }

        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(content) => {
                if let Err(e) = fs::write(&path, content) {
                    error!("Failed to save settings: {}", e);
                } else {
                    info!("Settings saved to: {:?}", path);
                }
            }
            Err(e) => {
                error!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Randomness source for scene generation
    pub fn sampler(&self) -> Sampler {
        match self.seed {
            Some(seed) => Sampler::Seeded { seed },
            None => Sampler::Entropy,
        }
    }
}

/// API credential for the text-generation service, read once at startup.
///
/// Empty when the environment variable is unset.
#[derive(Resource, Clone, Default, PartialEq, Eq)]
pub struct ApiCredential(pub String);

impl ApiCredential {
    pub fn from_env() -> Self {
        Self(std::env::var(API_KEY_VAR).unwrap_or_default())
    }

    pub fn is_present(&self) -> bool {
        !self.0.trim().is_empty()
    }

    pub fn key(&self) -> &str {
        self.0.trim()
    }
}

// Never print the key itself.
impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_present() {
            f.write_str("ApiCredential(<set>)")
        } else {
            f.write_str("ApiCredential(<missing>)")
        }
    }
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        // Tests and embedders may insert their own values first
        if !app.world().contains_resource::<TreeSettings>() {
            app.insert_resource(TreeSettings::load());
        }
        if !app.world().contains_resource::<ApiCredential>() {
            let credential = ApiCredential::from_env();
            if !credential.is_present() {
                warn!("{} is not set, wishes will use the offline greeting", API_KEY_VAR);
            }
            app.insert_resource(credential);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip_through_ron() {
        let settings = TreeSettings {
            particle_count: 1234,
            seed: Some(99),
            ..default()
        };
        let text = ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::default()).unwrap();
        assert_eq!(TreeSettings::parse(&text), settings);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings = TreeSettings::parse("(blend_rate: 4.0)");
        assert_eq!(settings.blend_rate, 4.0);
        assert_eq!(settings.particle_count, TreeSettings::default().particle_count);
        assert_eq!(settings.model, "gemini-2.5-flash");
    }

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        assert_eq!(TreeSettings::parse("not ron at all {"), TreeSettings::default());
    }

    #[test]
    fn sampler_follows_seed() {
        let mut settings = TreeSettings::default();
        assert_eq!(settings.sampler(), Sampler::Entropy);
        settings.seed = Some(7);
        assert_eq!(settings.sampler(), Sampler::Seeded { seed: 7 });
    }

    #[test]
    fn credential_presence_ignores_whitespace() {
        assert!(!ApiCredential::default().is_present());
        assert!(!ApiCredential("   ".into()).is_present());
        let credential = ApiCredential(" abc ".into());
        assert!(credential.is_present());
        assert_eq!(credential.key(), "abc");
        assert_eq!(format!("{credential:?}"), "ApiCredential(<set>)");
    }
}
