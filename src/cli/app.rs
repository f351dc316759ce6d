//! Main CLI application structure

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{file_cmd, shape_cmd};
use crate::domain::{SequentialIds, ShapeId, ShapeKind, Unit};
use crate::storage::{Config, ShapeRepository};

#[derive(Parser)]
#[command(name = "geoshapes")]
#[command(author, version, about = "Create, measure and store geometric shapes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Shape data file (defaults to the configured one)
    #[arg(long, global = true, env = "GEOSHAPES_FILE")]
    pub file: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, env = "GEOSHAPES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the data file once at the end instead of after every change
    #[arg(long, global = true)]
    pub no_autosave: bool,

    /// Apply changes in memory only, without writing the data file
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a shape
    ///
    /// Examples:
    ///   geoshapes add circle 2.5           # radius in the default unit
    ///   geoshapes add cube 30 --unit cm    # side given in centimeters
    Add {
        /// circle, square, cube or sphere
        kind: ShapeKind,

        /// Radius (circle, sphere) or side (square, cube)
        #[arg(allow_negative_numbers = true)]
        dimension: f64,

        /// Unit of the dimension
        #[arg(long, short)]
        unit: Option<Unit>,
    },

    /// List stored shapes
    List {
        /// Only shapes of this type (case-insensitive)
        #[arg(long = "type", short = 't')]
        kind: Option<String>,

        /// Display unit
        #[arg(long, short)]
        unit: Option<Unit>,
    },

    /// Show one shape with all its metrics
    Show {
        /// Shape ID
        id: ShapeId,

        /// Display unit
        #[arg(long, short)]
        unit: Option<Unit>,
    },

    /// Delete a shape
    Delete {
        /// Shape ID
        id: ShapeId,
    },

    /// Delete every shape and restart IDs at 1
    Clear,

    /// Show counts per type and metric totals
    Stats {
        /// Display unit
        #[arg(long, short)]
        unit: Option<Unit>,
    },

    /// Print the number of stored shapes
    Count,

    /// Write all shapes to another file
    Export {
        /// Destination file
        path: PathBuf,
    },

    /// Merge shapes from another file
    Import {
        /// Source file
        path: PathBuf,
    },

    /// Show where shapes are stored
    Info,

    /// Convert a length between units
    Convert {
        value: f64,
        from: Unit,
        to: Unit,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Runs an already parsed command line
pub fn execute(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let output = Output::new(cli.format, config.precision);
    tracing::debug!(?config, "configuration loaded");

    // Needs no stored shapes, so don't touch the data file
    if let Commands::Convert { value, from, to } = cli.command {
        return file_cmd::convert(&output, value, from, to);
    }

    let path = cli.file.clone().unwrap_or_else(|| config.data_file());
    let auto_save = config.auto_save && !cli.no_autosave && !cli.dry_run;
    let mut repo = ShapeRepository::open(path, auto_save, Arc::new(SequentialIds::new()));
    let unit = |u: Option<Unit>| u.unwrap_or(config.unit);

    let mutated = match cli.command {
        Commands::Add { kind, dimension, unit: u } => {
            shape_cmd::add(&mut repo, &output, kind, dimension, unit(u))?;
            true
        }
        Commands::List { kind, unit: u } => {
            shape_cmd::list(&repo, &output, kind.as_deref(), unit(u))?;
            false
        }
        Commands::Show { id, unit: u } => {
            shape_cmd::show(&repo, &output, id, unit(u))?;
            false
        }
        Commands::Delete { id } => {
            shape_cmd::delete(&mut repo, &output, id)?;
            true
        }
        Commands::Clear => {
            shape_cmd::clear(&mut repo, &output)?;
            true
        }
        Commands::Stats { unit: u } => {
            shape_cmd::stats(&repo, &output, unit(u))?;
            false
        }
        Commands::Count => {
            shape_cmd::count(&repo, &output)?;
            false
        }
        Commands::Export { path } => {
            file_cmd::export(&repo, &output, &path)?;
            false
        }
        Commands::Import { path } => {
            file_cmd::import(&mut repo, &output, &path)?;
            true
        }
        Commands::Info => {
            file_cmd::info(&repo, &output)?;
            false
        }
        Commands::Convert { .. } => unreachable!("handled before opening the repository"),
    };

    // With auto-save off the one-shot CLI still persists once at the end
    if mutated && !cli.dry_run && !repo.auto_save() {
        repo.save()?;
    }

    if let Some(e) = repo.take_sync_error() {
        output.warn(&format!("changes were applied but not saved: {}", e));
    }

    Ok(())
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the default level
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "geoshapes=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
