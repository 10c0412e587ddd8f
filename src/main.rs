//! Waitline: Front-desk patient queue
//!
//! Main entry point for the terminal application.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use waitline::adapters::sanitize::SanitizingMakeWriter;
use waitline::tui::App;
use waitline::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Logs on the terminal would corrupt the alternate screen, so an
    // interactive session logs to a file unless told otherwise.
    let use_file = config.log_mode.use_file(std::io::stdout().is_terminal());

    let (writer, _guard) = if use_file {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: a missing directory surfaces on open below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("opening log file {}", config.log_file.display()))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    tracing::info!(db = %config.db_path.display(), "Starting Waitline...");

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Waitline shutdown complete.");
    Ok(())
}
