//src/main.rs

use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use kingcrop_engine::{
    config::{AppConfig, AppState},
    services::ReportService,
    AppError,
};

fn main() -> anyhow::Result<()> {
    // Logs vão para stderr; stdout fica só com o relatório JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let mut config = AppConfig::from_env();
    if let Some(path) = std::env::args_os().nth(1) {
        config.snapshot_path = Some(PathBuf::from(path));
    }

    let app_state = AppState::new(&config).context("Falha ao inicializar o estado da aplicação")?;

    let snapshot_path = config.snapshot_path.ok_or(AppError::MissingSnapshotPath)?;
    let snapshot = ReportService::load_snapshot(&snapshot_path)?;

    let report = app_state.report_service.generate_report(&snapshot);
    let body = serde_json::to_string_pretty(&report).map_err(AppError::from)?;
    println!("{body}");

    Ok(())
}
