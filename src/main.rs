//! Main binary for the holiday tree.

use bevy::prelude::*;
use bevy_holiday_tree::HolidayTreePlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Holiday Tree".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(HolidayTreePlugin)
        .run();
}
