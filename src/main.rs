use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use sales_dashboard::app::DashboardApp;
use sales_dashboard::cli::{self, Cli, Command};
use sales_dashboard::config::DisplayConfig;
use sales_dashboard::data::cache::TableCache;
use sales_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let config = args.resolve_config()?;

    // The table is loaded once up front; a bad source aborts before any UI.
    let cache = TableCache::load(config.source.clone())
        .with_context(|| format!("loading {}", config.source.path.display()))?;

    match &args.command {
        Some(Command::Report(report_args)) => {
            let stdout = std::io::stdout();
            cli::run_report(&cache, report_args, &config.display, &mut stdout.lock())
        }
        None => run_dashboard(cache, config.display),
    }
}

fn run_dashboard(cache: TableCache, display: DisplayConfig) -> Result<()> {
    let mut state = AppState::new(display);
    state.set_cache(cache);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
