//! Application logic for the airline analyzer CLI.
//!
//! This module contains the pipeline driven by the `analyze` command,
//! separated from the main entry point to enable testing.

mod types;

use std::{
    io::{self, IsTerminal},
    path::Path,
    time::Duration
};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
pub use types::{AnalyzeParams, AnalyzeResult};

use crate::{
    chart::ChartOptions,
    cli::Format,
    config::Config,
    error::AppResult,
    inspect::inspect_database,
    logging::LoggingConfig,
    metrics::{MetricOptions, compute_metrics},
    output::{AnalysisReport, OutputFormat, OutputOptions, format_report},
    store::SqliteStore
};

/// Convert CLI format to internal OutputFormat
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Apply command-line overrides on top of the loaded configuration
pub fn apply_overrides(params: &AnalyzeParams, mut config: Config) -> AppResult<Config> {
    if let Some(database) = &params.database {
        config.database.path = database.clone();
    }
    if let Some(rate) = params.uplift_rate {
        config.report.uplift_rate = rate;
    }
    if let Some(rows) = params.head_rows {
        config.report.head_rows = rows;
    }
    if params.no_charts {
        config.report.charts = false;
    }
    if params.log_json {
        config.logging.json = true;
    }
    config.validate()?;
    Ok(config)
}

/// Create output options from parameters and configuration
pub fn create_output_options(params: &AnalyzeParams, config: &Config) -> OutputOptions {
    let format = convert_format(params.output_format);
    let colored = !params.no_color && format == OutputFormat::Text;
    OutputOptions {
        format,
        colored,
        charts: config.report.charts && format == OutputFormat::Text,
        head_rows: config.report.head_rows,
        chart: ChartOptions {
            width:  config.report.chart_width,
            height: config.report.chart_height,
            colored
        }
    }
}

/// Create metric options from configuration
pub fn create_metric_options(config: &Config) -> MetricOptions {
    MetricOptions {
        uplift_rate:          config.report.uplift_rate,
        large_aircraft_seats: config.report.large_aircraft_seats
    }
}

/// Build the logging configuration; `--verbose` forces debug level
pub fn build_logging_config(params: &AnalyzeParams, config: &Config) -> AppResult<LoggingConfig> {
    let logging = if params.verbose {
        LoggingConfig::default().with_level(tracing::Level::DEBUG)
    } else {
        LoggingConfig::from_level_name(&config.logging.level)?
    };
    Ok(logging
        .with_json_format(params.log_json || config.logging.json)
        .with_ansi(!params.no_color && io::stderr().is_terminal()))
}

/// Run the analyze command
pub fn run_analyze(params: AnalyzeParams, config: Config) -> AppResult<AnalyzeResult> {
    let config = apply_overrides(&params, config)?;
    let output_opts = create_output_options(&params, &config);
    let store = SqliteStore::open(Path::new(&config.database.path))?;
    info!(database = store.location(), "starting analysis");

    let inspection = inspect_database(&store, &config.database.tables, config.report.head_rows)?;

    let pb = if output_opts.format == OutputFormat::Text {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Computing metrics...");
    pb.enable_steady_tick(Duration::from_millis(100));
    let metrics = compute_metrics(&store, &create_metric_options(&config));
    pb.finish_and_clear();
    let metrics = metrics?;

    let report = AnalysisReport {
        database: store.location().to_string(),
        inspection,
        metrics
    };
    drop(store);

    let output = format_report(&report, &output_opts);
    Ok(AnalyzeResult {
        exit_code: 0,
        output,
        report
    })
}
