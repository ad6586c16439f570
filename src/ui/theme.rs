use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Resource to track if theme has been applied
#[derive(Resource, Default)]
pub struct ThemeApplied(pub bool);

pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ThemeApplied>()
            .add_systems(Update, apply_luxury_theme);
    }
}

/// Emerald and gold palette for the overlay
pub mod colors {
    use bevy_egui::egui::Color32;

    // Backgrounds (translucent so the tree shows through)
    pub const BG_DARKEST: Color32 = Color32::from_rgb(4, 14, 11);
    pub const BG_DARK: Color32 = Color32::from_rgba_premultiplied(5, 20, 15, 215);
    pub const BG_MEDIUM: Color32 = Color32::from_rgb(12, 36, 28);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 232, 210);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(180, 170, 145);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 105);

    // Accent colors
    pub const GOLD: Color32 = Color32::from_rgb(230, 190, 95);
    pub const GOLD_BRIGHT: Color32 = Color32::from_rgb(255, 220, 130);
    pub const EMERALD: Color32 = Color32::from_rgb(40, 190, 130);

    // Widget colors
    pub const WIDGET_BG: Color32 = Color32::from_rgb(14, 44, 34);
    pub const WIDGET_BG_HOVER: Color32 = Color32::from_rgb(20, 60, 46);
    pub const WIDGET_BG_ACTIVE: Color32 = Color32::from_rgb(28, 76, 58);
    pub const WIDGET_BORDER: Color32 = Color32::from_rgb(110, 90, 45);

    // Status colors
    pub const STATUS_WARNING: Color32 = Color32::from_rgb(230, 180, 80);
}

/// Window frame shared by the overlay panels
pub fn panel_frame(style: &egui::Style) -> egui::Frame {
    egui::Frame::window(style)
        .fill(colors::BG_DARK)
        .stroke(egui::Stroke::new(1.0, colors::WIDGET_BORDER))
        .inner_margin(egui::Margin::same(14))
}

/// Apply the theme to egui
fn apply_luxury_theme(mut contexts: EguiContexts, mut theme_applied: ResMut<ThemeApplied>) {
    if theme_applied.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut style = (*ctx.style()).clone();

    // Spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(10);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    // Rounding
    style.visuals.window_corner_radius = egui::CornerRadius::same(10);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);

    // Window styling
    style.visuals.window_fill = colors::BG_DARK;
    style.visuals.window_stroke = egui::Stroke::new(1.0, colors::WIDGET_BORDER);
    style.visuals.panel_fill = colors::BG_DARK;

    // Widget backgrounds
    style.visuals.widgets.noninteractive.bg_fill = colors::WIDGET_BG;
    style.visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, colors::TEXT_SECONDARY);
    style.visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, colors::BG_MEDIUM);

    style.visuals.widgets.inactive.bg_fill = colors::WIDGET_BG;
    style.visuals.widgets.inactive.weak_bg_fill = colors::WIDGET_BG;
    style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, colors::TEXT_PRIMARY);
    style.visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, colors::WIDGET_BORDER);

    style.visuals.widgets.hovered.bg_fill = colors::WIDGET_BG_HOVER;
    style.visuals.widgets.hovered.weak_bg_fill = colors::WIDGET_BG_HOVER;
    style.visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, colors::GOLD_BRIGHT);
    style.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, colors::GOLD);

    style.visuals.widgets.active.bg_fill = colors::WIDGET_BG_ACTIVE;
    style.visuals.widgets.active.weak_bg_fill = colors::WIDGET_BG_ACTIVE;
    style.visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, colors::GOLD_BRIGHT);
    style.visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, colors::GOLD_BRIGHT);

    // Selection colors
    style.visuals.selection.bg_fill = colors::EMERALD.gamma_multiply(0.5);
    style.visuals.selection.stroke = egui::Stroke::new(1.0, colors::GOLD);

    // Text edit background
    style.visuals.extreme_bg_color = colors::BG_DARKEST;

    style.visuals.override_text_color = Some(colors::TEXT_PRIMARY);

    ctx.set_style(style);
    theme_applied.0 = true;

    info!("Applied emerald and gold theme");
}
