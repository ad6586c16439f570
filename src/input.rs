use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::blend::{handle_toggle_events, ToggleTreeEvent};

/// Whether egui currently owns keyboard input.
#[derive(Resource, Default)]
pub struct KeyboardCaptured(pub bool);

pub struct TreeInputPlugin;

impl Plugin for TreeInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyboardCaptured>().add_systems(
            Update,
            (track_keyboard_capture, handle_toggle_shortcut)
                .chain()
                .before(handle_toggle_events),
        );
    }
}

fn track_keyboard_capture(mut contexts: EguiContexts, mut captured: ResMut<KeyboardCaptured>) {
    // A focused button also reacts to Space, so any focus counts
    captured.0 = contexts.ctx_mut().is_ok_and(|ctx| {
        ctx.wants_keyboard_input() || ctx.memory(|m| m.focused().is_some())
    });
}

/// Space toggles between Formed and Scattered
pub fn handle_toggle_shortcut(
    keyboard: Res<ButtonInput<KeyCode>>,
    captured: Res<KeyboardCaptured>,
    mut toggle_events: MessageWriter<ToggleTreeEvent>,
) {
    if captured.0 {
        return;
    }

    if keyboard.just_pressed(KeyCode::Space) {
        toggle_events.write(ToggleTreeEvent);
    }
}
