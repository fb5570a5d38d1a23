use clap::{Parser, Subcommand};

use crate::utils::export::{ExportFormat, TimeRange};

#[derive(Parser, Debug)]
#[command(name = "vakit", version, about = "Prayer times, countdown and Qibla in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's prayer times and countdown to the next prayer
    Times,
    /// Show the Qibla bearing for the active location or given coordinates
    Qibla {
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
    /// Manage saved locations
    Locations {
        #[command(subcommand)]
        action: LocationCommands,
    },
    /// Export prayer times for the coming days
    Export {
        #[arg(long, value_enum, default_value = "weekly")]
        range: TimeRange,
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<std::path::PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    /// List saved locations
    List,
    /// Save a location
    Add {
        /// City name
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long, default_value = "")]
        country: String,
        /// UTC offset, e.g. "+3", "5:30", "-4"; defaults to the active location's
        #[arg(long, allow_hyphen_values = true)]
        tz: Option<String>,
    },
    /// Remove a saved location
    Remove {
        id: i64,
    },
    /// Make a saved location the active one
    Use {
        id: i64,
    },
}
