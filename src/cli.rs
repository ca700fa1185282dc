use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Airline Analyzer - Exploratory analysis of an airline booking database
#[derive(Parser, Debug)]
#[command(name = "airline-analyzer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect the database and compute booking, fare and occupancy metrics
    Analyze {
        /// Path to the SQLite database file
        #[arg(short, long, env = "AIRLINE_DB")]
        database: Option<PathBuf>,

        /// Relative occupancy increase for the turnover projection (0.1 = 10%)
        #[arg(long)]
        uplift_rate: Option<f64>,

        /// Rows shown for table previews and date series
        #[arg(long)]
        head_rows: Option<usize>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Do not draw charts
        #[arg(long)]
        no_charts: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Enable debug logging on stderr
        #[arg(short, long)]
        verbose: bool,

        /// Emit logs as JSON
        #[arg(long)]
        log_json: bool
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
