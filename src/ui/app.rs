//! Main application UI.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout, RichText, ScrollArea};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FILE_PDF, FILE_XLS, GEAR};
use tokio::sync::mpsc;

use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::export::{self, ExportFormat};
use crate::form::SubmitRequest;
use crate::models::{Employee, EmployeeId, State};
use crate::session::{LoadOutcome, Session};

use super::components::colors;
use super::{form_panel, table_panel};

/// Messages from async tasks to UI.
pub enum UiMessage {
    // Data loading
    EmployeesLoaded {
        generation: u64,
        result: Result<Vec<Employee>, String>,
    },
    StatesLoaded(Vec<State>),
    StatesFailed(String),

    // CRUD operations
    EmployeeSaved(String),
    SaveFailed(String),
    DeleteFinished {
        id: EmployeeId,
        result: Result<(), String>,
    },

    // Connection test
    ConnectionTestResult(Result<bool, String>),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Connection test state for the settings dialog.
#[derive(Default, Clone)]
enum ConnectionTestState {
    #[default]
    NotTested,
    Testing,
    Success,
    Failed(String),
}

/// Main application state.
pub struct App {
    // Runtime and service client
    pub rt: tokio::runtime::Runtime,
    pub client: ApiClient,

    // Message channel for async communication
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,

    // Form, table, selection
    pub session: Session,

    // Loading state
    pub is_loading: bool,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Configuration
    pub config: AppConfig,
    config_path: PathBuf,
    pub export_format: ExportFormat,

    // Dialogs
    pub error_message: Option<String>,
    pub success_message: Option<String>,

    // Settings dialog
    settings_dialog_open: bool,
    settings_url_input: String,
    settings_test_state: ConnectionTestState,
}

impl App {
    pub fn new(
        client: ApiClient,
        config: AppConfig,
        config_path: PathBuf,
        rt: tokio::runtime::Runtime,
        initial_error: Option<String>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let settings_url_input = config.api.base_url.clone();
        let export_format = config.export.format;

        let mut app = Self {
            rt,
            client,
            tx,
            rx,
            session: Session::new(),
            is_loading: false,
            log_messages: Vec::new(),
            config,
            config_path,
            export_format,
            error_message: initial_error,
            success_message: None,
            settings_dialog_open: false,
            settings_url_input,
            settings_test_state: ConnectionTestState::NotTested,
        };

        // Load initial data
        app.load_states();
        app.load_employees();

        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    /// Log an info message.
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    /// Log a success message.
    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    /// Log a warning message.
    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    /// Log an error message.
    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Fetch the employee list for the current table generation.
    pub fn load_employees(&mut self) {
        self.load_employees_for(self.session.generation());
    }

    fn load_employees_for(&mut self, generation: u64) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.is_loading = true;

        self.rt.spawn(async move {
            let result = client.list_employees().await.map_err(|e| e.to_string());
            let _ = tx.send(UiMessage::EmployeesLoaded { generation, result });
        });
    }

    /// Fetch the state reference list.
    pub fn load_states(&mut self) {
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match client.list_states().await {
                Ok(states) => {
                    let _ = tx.send(UiMessage::StatesLoaded(states));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::StatesFailed(e.to_string()));
                }
            }
        });
    }

    /// Validate the form and send create or update.
    pub fn submit_form(&mut self) {
        let request = match self.session.submit() {
            Ok(request) => request,
            Err(e) => {
                self.error_message = Some(e.to_string());
                return;
            }
        };

        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = match &request {
                SubmitRequest::Create { draft } => client.create_employee(draft).await.map(|_| ()),
                SubmitRequest::Update { id, draft } => client.update_employee(*id, draft).await.map(|_| ()),
            };
            let name = match request {
                SubmitRequest::Create { draft } | SubmitRequest::Update { draft, .. } => draft.name,
            };
            match result {
                Ok(()) => {
                    let _ = tx.send(UiMessage::EmployeeSaved(name));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::SaveFailed(e.to_string()));
                }
            }
        });
    }

    /// Delete an employee; the list is reloaded whatever the outcome.
    pub fn delete_employee(&mut self, id: EmployeeId) {
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = client.delete_employee(id).await.map_err(|e| e.to_string());
            let _ = tx.send(UiMessage::DeleteFinished { id, result });
        });
    }

    /// Export the rows on the current page.
    pub fn export_visible_page(&mut self, format: ExportFormat) {
        let rows = export::export_rows(self.session.table.visible_rows());

        let Some(path) = export::show_save_dialog(format) else {
            return;
        };

        match export::export_to_file(format, &rows, &path) {
            Ok(()) => {
                tracing::info!("Exported {} rows to {}", rows.len(), path.display());
                self.success_message = Some(format!("Exported to: {}", path.display()));
                self.log_success(format!("Exported {} employees: {}", rows.len(), path.display()));
            }
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.error_message = Some(format!("Export failed: {}", e));
                self.log_error(format!("Export failed: {}", e));
            }
        }
    }

    /// Test the service URL typed in the settings dialog.
    fn test_settings_connection(&mut self) {
        let mut api = self.config.api.clone();
        api.base_url = self.settings_url_input.trim().to_string();
        let tx = self.tx.clone();
        self.settings_test_state = ConnectionTestState::Testing;

        self.rt.spawn(async move {
            let result = match ApiClient::new(&api) {
                Ok(client) => client.test_connection().await.map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(UiMessage::ConnectionTestResult(result));
        });
    }

    /// Save the service URL and reconnect.
    fn save_settings(&mut self) {
        let mut config = self.config.clone();
        config.api.base_url = self.settings_url_input.trim().to_string();
        config.export.format = self.export_format;

        if let Err(e) = config.validate() {
            self.error_message = Some(e.to_string());
            return;
        }

        match ApiClient::new(&config.api) {
            Ok(client) => self.client = client,
            Err(e) => {
                self.error_message = Some(e.to_string());
                return;
            }
        }

        // Save to config file
        if let Err(e) = config.save(&self.config_path) {
            tracing::error!("Failed to save config: {}", e);
            self.log_error(format!("Failed to save config: {}", e));
        }

        self.log_info(format!("API base URL set to {}", config.api.base_url));
        self.config = config;
        self.settings_dialog_open = false;
        self.load_states();
        self.load_employees();
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::EmployeesLoaded { generation, result } => {
                    if let Err(e) = &result {
                        tracing::error!("Error fetching employees: {}", e);
                    }
                    let error = result.as_ref().err().cloned();
                    match self.session.apply_employees(generation, result) {
                        LoadOutcome::Applied(count) => {
                            tracing::debug!("Loaded {} employees", count);
                            self.is_loading = false;
                        }
                        LoadOutcome::Failed => {
                            // No dialog: the table just stays empty.
                            self.log_error(format!("Error fetching employees: {}", error.unwrap_or_default()));
                            self.is_loading = false;
                        }
                        LoadOutcome::Stale => {
                            tracing::debug!("Dropped list response from generation {}", generation);
                        }
                    }
                }
                UiMessage::StatesLoaded(states) => {
                    tracing::debug!("Loaded {} states", states.len());
                    self.session.form.set_states(states);
                }
                UiMessage::StatesFailed(e) => {
                    tracing::warn!("Error fetching states: {}", e);
                    self.log_warning(format!("Error fetching states: {}", e));
                }
                UiMessage::EmployeeSaved(name) => {
                    self.session.on_saved();
                    self.success_message = Some(format!("Employee '{}' saved", name));
                    self.log_success(format!("Employee '{}' saved", name));
                    self.load_employees();
                }
                UiMessage::SaveFailed(e) => {
                    tracing::error!("Save failed: {}", e);
                    self.session.on_save_failed();
                    self.error_message = Some(format!("Save failed: {}", e));
                    self.log_error(format!("Save failed: {}", e));
                }
                UiMessage::DeleteFinished { id, result } => {
                    let outcome = self.session.on_delete_finished(result);
                    match outcome.error {
                        Some(e) => {
                            tracing::error!("{}", e);
                            self.log_error(e.clone());
                            self.error_message = Some(e);
                        }
                        None => self.log_success(format!("Employee {} deleted", id)),
                    }
                    self.load_employees_for(outcome.reload_generation);
                }
                UiMessage::ConnectionTestResult(result) => {
                    self.settings_test_state = match result {
                        Ok(true) => ConnectionTestState::Success,
                        Ok(false) => ConnectionTestState::Failed("Service answered with an error".to_string()),
                        Err(e) => ConnectionTestState::Failed(e),
                    };
                }
            }
        }
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button(format!("{FILE_PDF} Export page to PDF")).clicked() {
                        self.export_visible_page(ExportFormat::Pdf);
                        ui.close();
                    }
                    if ui.button(format!("{FILE_XLS} Export page to Excel")).clicked() {
                        self.export_visible_page(ExportFormat::Xlsx);
                        ui.close();
                    }
                });
                ui.menu_button("Tools", |ui| {
                    if ui.button(format!("{ARROWS_CLOCKWISE} Reload")).clicked() {
                        self.load_employees();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button(format!("{GEAR} API Settings")).clicked() {
                        self.settings_dialog_open = true;
                        self.settings_url_input = self.config.api.base_url.clone();
                        self.settings_test_state = ConnectionTestState::NotTested;
                        ui.close();
                    }
                });
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    if self.is_loading {
                        ui.spinner();
                    }
                    ui.colored_label(colors::NEUTRAL, format!("API: {}", self.client.base_url()));

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(entry) = self.log_messages.last() {
                            let color = match entry.level {
                                LogLevel::Info => colors::NEUTRAL,
                                LogLevel::Success => colors::SUCCESS,
                                LogLevel::Warning => colors::WARNING,
                                LogLevel::Error => colors::ERROR,
                            };
                            ui.colored_label(
                                color,
                                format!("{} {}", entry.timestamp.format("%H:%M:%S"), entry.message),
                            );
                        }
                    });
                });
            });
    }

    /// Render API settings dialog.
    fn show_settings_dialog(&mut self, ctx: &egui::Context) {
        if !self.settings_dialog_open {
            return;
        }

        let mut open = true;
        egui::Window::new("API Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_space(10.0);

                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Base URL:");
                        ui.add(egui::TextEdit::singleline(&mut self.settings_url_input).desired_width(300.0));
                        ui.end_row();

                        ui.label("Export format:");
                        egui::ComboBox::from_id_salt("settings_export_format")
                            .selected_text(self.export_format.label())
                            .show_ui(ui, |ui| {
                                for format in [ExportFormat::Pdf, ExportFormat::Xlsx] {
                                    ui.selectable_value(&mut self.export_format, format, format.label());
                                }
                            });
                        ui.end_row();
                    });

                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    let testing = matches!(self.settings_test_state, ConnectionTestState::Testing);
                    if ui.add_enabled(!testing, egui::Button::new("Test Connection")).clicked() {
                        self.test_settings_connection();
                    }

                    ui.add_space(10.0);

                    match &self.settings_test_state {
                        ConnectionTestState::NotTested => {}
                        ConnectionTestState::Testing => {
                            ui.spinner();
                            ui.label("Testing...");
                        }
                        ConnectionTestState::Success => {
                            ui.colored_label(colors::SUCCESS, "Connection successful!");
                        }
                        ConnectionTestState::Failed(e) => {
                            ui.colored_label(colors::ERROR, format!("Failed: {}", e));
                        }
                    }
                });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.settings_dialog_open = false;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Save").clicked() {
                            self.save_settings();
                        }
                    });
                });
            });

        if !open {
            self.settings_dialog_open = false;
        }
    }

    /// Render modal dialogs (error, success, delete confirmation).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }

        // Delete confirmation dialog
        if let Some(target) = self.session.pending_delete().cloned() {
            egui::Window::new("Delete Employee")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("Are you sure you want to delete this employee?");
                    ui.label(RichText::new(&target.name).strong());
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.session.cancel_delete();
                        }
                        if ui.button("Delete").clicked()
                            && let Some(target) = self.session.confirm_delete()
                        {
                            self.log_info(format!("Deleting employee: {}", target.name));
                            self.delete_employee(target.id);
                        }
                    });
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Request repaint during async operations
        if self.is_loading
            || self.session.form.is_pending()
            || matches!(self.settings_test_state, ConnectionTestState::Testing)
        {
            ctx.request_repaint();
        }

        // Menu bar
        self.show_menu_bar(ctx);

        // Status bar
        self.show_status_bar(ctx);

        // Settings dialog
        self.show_settings_dialog(ctx);

        // Modal dialogs (error, success, delete confirmation)
        self.show_dialogs(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut scroll = ScrollArea::vertical().id_salt("main_scroll").auto_shrink([false, false]);
            if self.session.take_scroll_to_top() {
                scroll = scroll.vertical_scroll_offset(0.0);
            }

            scroll.show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(10.0);
                    ui.label(RichText::new("Employee Manager").size(28.0).strong());
                });
                ui.add_space(20.0);

                form_panel::show(self, ui);

                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                table_panel::show(self, ui);
            });
        });
    }
}
