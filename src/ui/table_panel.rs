//! Employee table panel with search, sortable headers, paging and export.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CARET_DOWN, CARET_UP, FILE_PDF, FILE_XLS, PENCIL, TRASH};

use super::app::App;
use super::components::{
    action_button, colors, danger_action_button, panel_header, styled_button, styled_button_with_icon,
};
use crate::export::ExportFormat;
use crate::models::Employee;
use crate::table::{SortKey, SortOrder};

/// Row-level actions collected while drawing, applied afterwards.
enum RowAction {
    Toggle(i64),
    Edit(Employee),
    Delete(i64, String),
}

/// Show the employee table.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Employees");

    // Toolbar: search, reload, export
    ui.horizontal(|ui| {
        ui.label("Search:");
        let mut search = app.session.table.search().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut search)
                .desired_width(220.0)
                .hint_text("Name, designation, gender, state..."),
        );
        if response.changed() {
            app.session.table.set_search(search);
        }

        if !app.session.table.search().is_empty() {
            ui.add_space(6.0);
            if styled_button(ui, "Clear").clicked() {
                app.session.table.set_search(String::new());
            }
        }

        ui.add_space(20.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Reload").clicked() {
            app.load_employees();
        }

        ui.add_space(10.0);

        // Default format comes from the settings dialog; the File menu offers both.
        let format = app.export_format;
        let icon = match format {
            ExportFormat::Pdf => FILE_PDF,
            ExportFormat::Xlsx => FILE_XLS,
        };
        if styled_button_with_icon(ui, icon, &format!("Export {}", format.label())).clicked() {
            app.export_visible_page(format);
        }
    });

    ui.add_space(10.0);

    let table = &app.session.table;
    ui.horizontal(|ui| {
        ui.label(format!(
            "Showing {} of {} employees",
            table.filtered_len(),
            table.employees().len()
        ));
        if table.selected_count() > 0 {
            ui.add_space(10.0);
            ui.colored_label(colors::NEUTRAL, format!("{} selected", table.selected_count()));
        }
    });

    ui.add_space(8.0);

    let rows: Vec<Employee> = table.visible_rows().into_iter().cloned().collect();
    let selected: Vec<bool> = rows.iter().map(|e| table.is_selected(e.id)).collect();
    let sort = table.sort_state();
    let saving = app.session.form.is_pending();

    let mut actions = Vec::new();
    let mut sort_click = None;

    egui::Grid::new("employees_grid")
        .num_columns(9)
        .striped(true)
        .min_col_width(40.0)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            // Header
            ui.strong("");
            for key in [SortKey::Name, SortKey::Designation] {
                let caret = match sort {
                    Some(s) if s.key == key => match s.order {
                        SortOrder::Ascending => CARET_UP,
                        SortOrder::Descending => CARET_DOWN,
                    },
                    _ => "",
                };
                let header = RichText::new(format!("{} {}", key.label(), caret)).strong();
                if ui.add(egui::Button::new(header).frame(false)).clicked() {
                    sort_click = Some(key);
                }
            }
            ui.strong("Date of Join");
            ui.strong("Date of Birth");
            ui.strong("Salary");
            ui.strong("Gender");
            ui.strong("State");
            ui.strong("Actions");
            ui.end_row();

            // Data rows
            for (emp, was_selected) in rows.iter().zip(selected) {
                let mut checked = was_selected;
                if ui.checkbox(&mut checked, "").changed() {
                    actions.push(RowAction::Toggle(emp.id));
                }
                ui.label(&emp.name);
                ui.label(&emp.designation);
                ui.label(emp.date_of_join.format("%Y-%m-%d").to_string());
                ui.label(emp.date_of_birth.format("%Y-%m-%d").to_string());
                ui.label(emp.salary_display());
                ui.label(emp.gender.as_str());
                ui.label(&emp.state_name);

                ui.horizontal(|ui| {
                    if ui.add_enabled_ui(!saving, |ui| action_button(ui, PENCIL, "Edit")).inner.clicked() {
                        actions.push(RowAction::Edit(emp.clone()));
                    }
                    ui.add_space(4.0);
                    if danger_action_button(ui, TRASH, "Delete").clicked() {
                        actions.push(RowAction::Delete(emp.id, emp.name.clone()));
                    }
                });

                ui.end_row();
            }
        });

    if rows.is_empty() {
        ui.add_space(6.0);
        ui.colored_label(colors::NEUTRAL, "No employees to show");
    }

    ui.add_space(10.0);

    // Page buttons
    let page_count = app.session.table.page_count();
    let current = app.session.table.current_page();
    let mut page_click = None;
    if page_count > 0 {
        ui.horizontal(|ui| {
            for page in 1..=page_count {
                if ui.selectable_label(page == current, page.to_string()).clicked() {
                    page_click = Some(page);
                }
            }
        });
    }

    if let Some(key) = sort_click {
        app.session.table.sort_by(key);
    }
    if let Some(page) = page_click {
        app.session.table.set_page(page);
    }
    for action in actions {
        match action {
            RowAction::Toggle(id) => app.session.table.toggle_selected(id),
            RowAction::Edit(emp) => {
                app.session.edit(emp);
            }
            RowAction::Delete(id, name) => app.session.request_delete(id, name),
        }
    }
}
