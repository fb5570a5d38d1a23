use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use vakit::cli::args::{Cli, Commands};
use vakit::cli::handlers;
use vakit::config::AppConfig;
use vakit::db::migrations::run_migrations;
use vakit::prayer_times::PrayerCalculator;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Times) => {
            handlers::handle_times(&conn, &config, config.salah.now()?)?;
        }
        Some(Commands::Qibla { lat, lng }) => {
            handlers::handle_qibla(&config, lat, lng)?;
        }
        Some(Commands::Locations { action }) => {
            handlers::handle_locations(&conn, &mut config, &action)?;
        }
        Some(Commands::Export {
            range,
            format,
            output,
        }) => {
            handlers::handle_export(&conn, &config, range, format, output.as_deref())?;
        }

        // No subcommand → launch TUI
        None => {
            // Warm the cache for the coming week
            let warmed = PrayerCalculator::from_config(&config.salah)
                .and_then(|calc| calc.ensure_cached(&conn, config.salah.now()?.date(), 7));
            if let Err(e) = warmed {
                log::warn!("could not pre-compute prayer times: {:#}", e);
            }
            vakit::tui::app::run(conn, config)?;
        }
    }

    Ok(())
}
