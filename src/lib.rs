//! # Bevy Holiday Tree
//!
//! An interactive holiday tree: thousands of glowing needles and ornaments
//! drift in a loose cloud and sweep together into a cone when the tree is
//! assembled. A small panel asks a language model for a personal holiday
//! wish.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_holiday_tree::HolidayTreePlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(HolidayTreePlugin)
//!         .run();
//! }
//! ```
//!
//! ## Controls
//!
//! - **Space** or the **Assemble/Scatter** button: toggle the tree
//! - **Make a Wish**: assemble the tree and request a greeting
//!
//! Wishes need `GEMINI_API_KEY` in the environment. Without it the panel shows
//! a fixed greeting and never touches the network.

pub mod blend;
pub mod constants;
pub mod input;
pub mod scene;
pub mod settings;
pub mod ui;
pub mod wish;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub use blend::{BlendDriver, ToggleTreeEvent};
pub use settings::{ApiCredential, TreeSettings};
pub use wish::{SubmitWishEvent, WishGenerator, WishService, WishState, WishStatus};

/// Everything needed to show the tree and its wish panel.
pub struct HolidayTreePlugin;

impl Plugin for HolidayTreePlugin {
    fn build(&self, app: &mut App) {
        // Settings first so later plugins can read them during build
        app.add_plugins(settings::SettingsPlugin)
            .add_plugins(EguiPlugin::default())
            .add_plugins((
                blend::BlendPlugin,
                wish::WishPlugin,
                scene::TreeScenePlugin,
                input::TreeInputPlugin,
                ui::UiPlugin,
            ));
    }
}
