//! Shared UI components.

use eframe::egui::{self, Color32, Response, RichText, Ui};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const PRIMARY: Color32 = Color32::from_rgb(60, 120, 200);
    pub const DANGER: Color32 = Color32::from_rgb(190, 60, 60);
}

const BUTTON_HEIGHT: f32 = 28.0;
const ACTION_HEIGHT: f32 = 22.0;

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(22.0));
    ui.add_space(6.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Plain toolbar button.
pub fn styled_button(ui: &mut Ui, label: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(label).size(14.0)).min_size(egui::vec2(0.0, BUTTON_HEIGHT)))
}

/// Toolbar button with a leading phosphor icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    styled_button(ui, &format!("{icon} {label}"))
}

/// Highlighted button for the main action of a panel.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, label: &str, enabled: bool) -> Response {
    let button = egui::Button::new(RichText::new(format!("{icon} {label}")).size(14.0).color(Color32::WHITE))
        .fill(colors::PRIMARY)
        .min_size(egui::vec2(90.0, BUTTON_HEIGHT));
    ui.add_enabled(enabled, button)
}

/// Compact row action button.
pub fn action_button(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(format!("{icon} {label}")).size(13.0)).min_size(egui::vec2(0.0, ACTION_HEIGHT)))
}

/// Compact row action button for destructive actions.
pub fn danger_action_button(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.add(
        egui::Button::new(RichText::new(format!("{icon} {label}")).size(13.0).color(colors::DANGER))
            .min_size(egui::vec2(0.0, ACTION_HEIGHT)),
    )
}
