//! Coin Viewer - dual-colored die study scatter
//!
//! CLI commands:
//! - gui: Launch the native viewer
//! - columns: Inspect a CSV's columns

mod config;
mod gui;
mod logging;
mod plot;
mod table;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "coin_viewer")]
#[command(about = "Interactive dual-colored coin scatter viewer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to viewer.yaml config
    #[arg(short, long, default_value = "viewer.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the native GUI viewer
    Gui {
        /// CSV file to load at startup
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Print the columns of a CSV file
    Columns {
        /// CSV file to inspect
        csv: PathBuf,

        /// Emit a JSON summary instead of plain text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging first
    let env = config::Env::load();
    logging::init_logging(&env.log_dir);
    tracing::info!("Coin Viewer starting up");

    let cli = Cli::parse();
    tracing::debug!("CLI args parsed: config={:?}", cli.config);

    // Load config
    let config = if cli.config.exists() {
        tracing::info!("Loading config from {:?}", cli.config);
        config::Config::load(&cli.config)?
    } else {
        tracing::warn!("Config file not found: {:?}, using defaults", cli.config);
        config::Config::default()
    };

    match cli.command {
        Commands::Gui { csv } => {
            tracing::info!("Launching native GUI viewer");
            gui::run_viewer(config, env.data_dir, csv)?;
        }

        Commands::Columns { csv, json } => {
            columns(&csv, json)?;
        }
    }

    Ok(())
}

/// Print a CSV's column names and row count
fn columns(path: &Path, json: bool) -> anyhow::Result<()> {
    let table = table::DataTable::from_csv_path(path)?;

    if json {
        let summary = serde_json::json!({
            "path": path,
            "columns": table.columns(),
            "rows": table.row_count(),
            "generated": chrono::Local::now().to_rfc3339(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Columns in {:?} ({} rows):", path, table.row_count());
        for name in table.columns() {
            println!("  - {}", name);
        }
    }

    Ok(())
}
