//! Prompt Statistics Dashboard
//!
//! A GUI application for monitoring prompt template usage and success rates.

use anyhow::Context;
use eframe::egui;
use log::info;
use tracing_subscriber::EnvFilter;

use promptstats::app::{App, DashboardState};
use promptstats::data::{JsonFileProvider, MockProvider, PromptProvider};
use promptstats::{plotting, Config};

#[cfg(feature = "dev")]
const DEFAULT_LOG_FILTER: &str = "promptstats=debug,eframe=info,egui=info";
#[cfg(not(feature = "dev"))]
const DEFAULT_LOG_FILTER: &str = "promptstats=info,eframe=warn,egui=warn";

fn init_logging() {
    // RUST_LOG overrides the default filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Also bridges `log` records from the library and eframe
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

fn load_provider(config: &Config) -> anyhow::Result<Box<dyn PromptProvider>> {
    match &config.data_file {
        Some(path) => {
            let provider = JsonFileProvider::load(path)
                .with_context(|| format!("failed to load prompt data from {}", path.display()))?;
            info!(
                "Loaded {} prompts from {}",
                provider.prompts().len(),
                path.display()
            );
            Ok(Box::new(provider))
        }
        None => {
            info!("Using built-in demo data");
            Ok(Box::new(MockProvider::new()))
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::load().context("failed to load configuration")?;
    plotting::set_cache_capacity(config.plot_cache_size);

    let provider = load_provider(&config)?;
    let state = DashboardState::new(provider, &config);
    let app = App::new(state, &config);

    // Initialize the GUI application with the configured window size
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Prompt Statistics"),
        ..Default::default()
    };

    eframe::run_native(
        "Prompt Statistics",
        options,
        Box::new(|cc| {
            // Configure default fonts and style
            cc.egui_ctx.set_fonts(egui::FontDefinitions::default());
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow::anyhow!("error running application: {}", e))
}
