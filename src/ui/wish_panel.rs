use bevy::prelude::*;
use bevy_egui::{egui, EguiContext, EguiContextSettings, EguiContexts, EguiPrimaryContextPass};

use super::theme::{colors, panel_frame};
use crate::blend::{BlendDriver, ToggleTreeEvent};
use crate::settings::TreeSettings;
use crate::wish::{SubmitWishEvent, WishService, WishState};

pub struct WishPanelPlugin;

impl Plugin for WishPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_ui_scale)
            .add_systems(EguiPrimaryContextPass, draw_wish_panel);
    }
}

/// Label of the button that flips the tree.
pub fn toggle_label(formed: bool) -> &'static str {
    if formed { "Scatter" } else { "Assemble" }
}

/// Apply UI scale to egui
fn apply_ui_scale(
    settings: Res<TreeSettings>,
    mut query: Query<&mut EguiContextSettings, With<EguiContext>>,
) {
    for mut ctx_settings in &mut query {
        ctx_settings.scale_factor = settings.ui_scale;
    }
}

/// Draw the wish panel
fn draw_wish_panel(
    mut contexts: EguiContexts,
    mut state: ResMut<WishState>,
    mut settings: ResMut<TreeSettings>,
    mut blend: ResMut<BlendDriver>,
    service: Res<WishService>,
    mut submit_events: MessageWriter<SubmitWishEvent>,
    mut toggle_events: MessageWriter<ToggleTreeEvent>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Holiday Wish")
        .frame(panel_frame(&ctx.style()))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .show(ctx, |ui| {
            ui.set_width(360.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Holiday Wish")
                        .size(20.0)
                        .color(colors::GOLD),
                );
            });
            ui.add_space(6.0);

            // Greeting
            if state.is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new("Conjuring your wish...").color(colors::TEXT_SECONDARY));
                });
            } else if let Some(text) = state.text() {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(text)
                            .italics()
                            .size(16.0)
                            .color(colors::GOLD_BRIGHT),
                    );
                });
            }

            if state.error().is_some() {
                ui.label(
                    egui::RichText::new("The wish service is unreachable, showing a classic greeting.")
                        .small()
                        .color(colors::STATUS_WARNING),
                );
            } else if !service.is_online() {
                ui.label(
                    egui::RichText::new("Offline: set GEMINI_API_KEY for personal wishes.")
                        .small()
                        .color(colors::TEXT_MUTED),
                );
            }

            ui.add_space(8.0);

            let mut submit = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.input)
                        .hint_text("What do they love?")
                        .desired_width(220.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }

                // A new submit while loading starts its own request
                if ui.button("Make a Wish").clicked() {
                    submit = true;
                }
            });

            if submit {
                submit_events.write(SubmitWishEvent {
                    input: state.input.clone(),
                });
            }

            ui.add_space(4.0);
            ui.vertical_centered(|ui| {
                if ui.button(toggle_label(blend.is_formed())).clicked() {
                    toggle_events.write(ToggleTreeEvent);
                }
                ui.label(
                    egui::RichText::new("Space toggles the tree")
                        .small()
                        .color(colors::TEXT_MUTED),
                );
            });

            ui.add_space(4.0);
            egui::CollapsingHeader::new("Settings")
                .default_open(false)
                .show(ui, |ui| {
                    let mut changed = false;
                    egui::Grid::new("tree_settings_grid")
                        .num_columns(2)
                        .spacing([10.0, 8.0])
                        .show(ui, |ui| {
                            ui.label("Blend Speed:");
                            changed |= ui
                                .add(egui::Slider::new(&mut settings.blend_rate, 0.5..=8.0).step_by(0.25))
                                .changed();
                            ui.end_row();

                            ui.label("Orbit Speed:");
                            changed |= ui
                                .add(
                                    egui::Slider::new(&mut settings.orbit_speed, 0.0..=0.5)
                                        .step_by(0.01)
                                        .suffix(" rad/s"),
                                )
                                .changed();
                            ui.end_row();

                            ui.label("UI Scale:");
                            changed |= ui
                                .add(
                                    egui::Slider::new(&mut settings.ui_scale, 0.75..=3.0)
                                        .step_by(0.25)
                                        .suffix("x"),
                                )
                                .changed();
                            ui.end_row();
                        });

                    ui.label(
                        egui::RichText::new("Particle counts and shape apply on restart.")
                            .small()
                            .color(colors::TEXT_MUTED),
                    );

                    if changed {
                        blend.rate = settings.blend_rate;
                        settings.save();
                    }
                });
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_label_names_the_next_state() {
        assert_eq!(toggle_label(true), "Scatter");
        assert_eq!(toggle_label(false), "Assemble");
    }
}
