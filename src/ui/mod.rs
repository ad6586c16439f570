pub mod theme;
pub mod wish_panel;

pub use theme::*;
pub use wish_panel::*;

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((ThemePlugin, WishPanelPlugin));
    }
}
