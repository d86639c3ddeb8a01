//! Employee Console - desktop CRUD console for employee records.

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use employee_console as app;

use app::client::ApiClient;
use app::config::{AppConfig, ConfigLoadResult};
use app::ui::App;

/// Desktop console for managing employee records over a REST service.
#[derive(Parser)]
#[command(name = "employee-console")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Override the API base URL for this run
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let _log_guard = app::logging::init(app::logging::default_log_dir());

    tracing::info!("Employee Console starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let (mut config, mut initial_error) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            (config, None)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Failed to write default config: {}", e);
            }
            (config, None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            (AppConfig::default(), Some(format!("Config invalid, using defaults: {e}")))
        }
    };

    if let Some(url) = cli.api_url {
        let previous = std::mem::replace(&mut config.api.base_url, url);
        if let Err(e) = config.validate() {
            tracing::warn!("Ignoring --api-url: {}", e);
            initial_error = Some(format!("Ignoring --api-url: {e}"));
            config.api.base_url = previous;
        }
    }
    tracing::info!("API base URL: {}", config.api.base_url);

    let client = match ApiClient::new(&config.api) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            return Ok(());
        }
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Employee Manager")
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Employee Manager",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(App::new(client, config, config_path, rt, initial_error)))
        }),
    )
}
