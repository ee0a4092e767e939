//! Tingli CLI entry point.

use anyhow::Result;
use clap::Parser;
use tingli::cli::{commands, Cli, Commands};
use tingli::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tingli={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure the data directory exists
    std::fs::create_dir_all(settings.data_dir())?;

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Clip { action } => {
            commands::run_clip(action, settings).await?;
        }

        Commands::Ingest { clip_id, file } => {
            commands::run_ingest(clip_id, file.as_deref(), settings).await?;
        }

        Commands::List => {
            commands::run_list(settings).await?;
        }

        Commands::Show { clip_id } => {
            commands::run_show(clip_id, settings).await?;
        }

        Commands::Export {
            clip_id,
            output,
            format,
        } => {
            commands::run_export(clip_id, output.clone(), format, settings).await?;
        }

        Commands::Locate { clip_id, position } => {
            commands::run_locate(clip_id, *position, settings).await?;
        }

        Commands::Bookmark { action } => {
            commands::run_bookmark(action, settings).await?;
        }

        Commands::Quiz { clip_id, limit } => {
            commands::run_quiz(clip_id, *limit, settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
