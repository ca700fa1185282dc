//! # Airline Analyzer
//!
//! Exploratory analysis of an airline booking database.
//!
//! `airline-analyzer` opens a local SQLite file (`travel.sqlite` by default),
//! lists and describes its tables, profiles missing values and computes a
//! set of business metrics: seats per aircraft, ticket and revenue trends by
//! booking date, average fares per aircraft and fare class, revenue per
//! aircraft, occupancy rates and the turnover a higher occupancy would
//! bring.
//!
//! # Quick Start
//!
//! ```bash
//! # Analyze travel.sqlite in the current directory
//! airline-analyzer analyze
//!
//! # Another database, 15% uplift, no charts
//! airline-analyzer analyze -d data/airlines.sqlite --uplift-rate 0.15 --no-charts
//!
//! # Machine-readable report
//! airline-analyzer analyze -f json > report.json
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`AIRLINE_DB`, `AIRLINE_UPLIFT_RATE`,
//!    `AIRLINE_LOG_LEVEL`)
//! 3. `.airline-analyzer.toml` in current directory
//! 4. `~/.config/airline-analyzer/config.toml`
//!
//! # Metrics
//!
//! | Metric | Source |
//! |--------|--------|
//! | Seats per aircraft | `seats` grouped by aircraft code |
//! | Tickets by date | `tickets` ⋈ `bookings`, counted per booking date |
//! | Revenue by date | `bookings.total_amount` summed per booking date |
//! | Average fare | `ticket_flights` ⋈ `flights`, per aircraft and fare class |
//! | Revenue per ticket | summed `amount` ÷ ticket count per aircraft |
//! | Occupancy rate | average boarding passes per flight ÷ seats |
//! | Uplift | turnover rescaled by a higher occupancy rate |
//!
//! # Exit Codes
//!
//! - `0` - Analysis completed
//! - `1` - Any failure (missing database, missing table, bad config)

use std::process;

use airline_analyzer::{
    app::{AnalyzeParams, build_logging_config, run_analyze},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult,
    logging::init_logging
};
use clap::Parser;

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e.render_message());
            process::exit(1);
        }
    }
}

fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            database,
            uplift_rate,
            head_rows,
            output_format,
            no_charts,
            no_color,
            verbose,
            log_json
        } => {
            let params = AnalyzeParams {
                database: database.map(|p| p.display().to_string()),
                uplift_rate,
                head_rows,
                output_format,
                no_charts,
                no_color,
                verbose,
                log_json
            };
            init_logging(&build_logging_config(&params, &config)?)?;
            let result = run_analyze(params, config)?;
            println!("{}", result.output);
            Ok(result.exit_code)
        }
    }
}
