//! Employee form panel: create and edit in place above the table.

use chrono::{Local, NaiveDate};
use eframe::egui::{self, Ui};
use egui_extras::DatePickerButton;
use egui_phosphor::regular::{FLOPPY_DISK, X};

use super::app::App;
use super::components::{colors, panel_header, primary_button_with_icon, styled_button_with_icon};
use crate::models::{Gender, parse_flexible_date};

/// Show the employee form.
pub fn show(app: &mut App, ui: &mut Ui) {
    let form = &mut app.session.form;
    panel_header(ui, form.title());

    egui::Grid::new("employee_form_grid")
        .num_columns(2)
        .spacing([20.0, 10.0])
        .show(ui, |ui| {
            ui.label("Name:");
            ui.add(egui::TextEdit::singleline(&mut form.draft.name).desired_width(250.0));
            ui.end_row();

            ui.label("Designation:");
            ui.add(egui::TextEdit::singleline(&mut form.draft.designation).desired_width(250.0));
            ui.end_row();

            ui.label("Date of Join:");
            date_input(ui, "form_doj", &mut form.draft.date_of_join);
            ui.end_row();

            ui.label("Date of Birth:");
            date_input(ui, "form_dob", &mut form.draft.date_of_birth);
            ui.end_row();

            ui.label("Salary:");
            ui.add(
                egui::TextEdit::singleline(&mut form.draft.salary)
                    .desired_width(120.0)
                    .hint_text("0"),
            );
            ui.end_row();

            ui.label("Gender:");
            let gender_text = if form.draft.gender.is_empty() {
                "Select...".to_string()
            } else {
                form.draft.gender.clone()
            };
            egui::ComboBox::from_id_salt("form_gender")
                .width(150.0)
                .selected_text(gender_text)
                .show_ui(ui, |ui| {
                    for gender in Gender::ALL {
                        if ui
                            .selectable_label(Gender::parse(&form.draft.gender) == Some(gender), gender.as_str())
                            .clicked()
                        {
                            form.draft.gender = gender.as_str().to_string();
                        }
                    }
                });
            ui.end_row();

            ui.label("State:");
            let state_text = form.selected_state_name().unwrap_or("Select...").to_string();
            let mut picked = None;
            egui::ComboBox::from_id_salt("form_state")
                .width(200.0)
                .selected_text(state_text)
                .show_ui(ui, |ui| {
                    let current = form.draft.state_id.trim().parse::<i64>().ok();
                    for state in form.states() {
                        if ui.selectable_label(current == Some(state.id), &state.name).clicked() {
                            picked = Some(state.id);
                        }
                    }
                });
            if let Some(id) = picked {
                form.draft.state_id = id.to_string();
            }
            ui.end_row();
        });

    ui.add_space(12.0);

    let pending = app.session.form.is_pending();
    let editing = app.session.form.is_editing();
    let label = app.session.form.submit_label();

    let mut submit = false;
    let mut cancel = false;
    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, FLOPPY_DISK, label, !pending).clicked() {
            submit = true;
        }
        if pending {
            ui.spinner();
        }
        if editing {
            ui.add_space(10.0);
            if styled_button_with_icon(ui, X, "Cancel").clicked() {
                cancel = true;
            }
        }
    });

    if submit {
        app.submit_form();
    }
    if cancel {
        app.session.cancel_edit();
    }
}

/// Free-text date with a picker next to it; invalid text is shown in red.
fn date_input(ui: &mut Ui, id: &str, value: &mut String) {
    ui.horizontal(|ui| {
        let parsed = parse_flexible_date(value);
        let valid = value.is_empty() || parsed.is_some();
        let text_color = if valid { ui.visuals().text_color() } else { colors::ERROR };

        let response = ui.add(
            egui::TextEdit::singleline(value)
                .desired_width(110.0)
                .hint_text("YYYY-MM-DD")
                .text_color(text_color),
        );
        // Normalize on focus lost
        if response.lost_focus()
            && let Some(date) = parse_flexible_date(value)
        {
            *value = date.format("%Y-%m-%d").to_string();
        }

        let mut date: NaiveDate = parsed.unwrap_or_else(|| Local::now().date_naive());
        if ui
            .add(DatePickerButton::new(&mut date).id_salt(id).show_icon(true))
            .changed()
        {
            *value = date.format("%Y-%m-%d").to_string();
        }
    });
}
