//! Application types for CLI commands.

use crate::{cli::Format, output::AnalysisReport};

/// Parameters for the analyze command.
///
/// Every `Option` left as `None` falls back to the loaded configuration.
///
/// # Example
///
/// ```
/// use airline_analyzer::{app::AnalyzeParams, cli::Format};
///
/// let params = AnalyzeParams {
///     database:      Some("travel.sqlite".to_string()),
///     uplift_rate:   None,
///     head_rows:     None,
///     output_format: Format::Text,
///     no_charts:     false,
///     no_color:      false,
///     verbose:       false,
///     log_json:      false
/// };
/// assert!(params.uplift_rate.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzeParams {
    /// Path to the SQLite database file.
    pub database:      Option<String>,
    /// Relative occupancy increase for the uplift projection.
    pub uplift_rate:   Option<f64>,
    /// Rows shown for previews and date series.
    pub head_rows:     Option<usize>,
    /// Output format for results.
    pub output_format: Format,
    /// Skip chart rendering.
    pub no_charts:     bool,
    /// Disable colored terminal output.
    pub no_color:      bool,
    /// Enable debug logging.
    pub verbose:       bool,
    /// Emit logs as JSON.
    pub log_json:      bool
}

/// Result of analysis containing the report and its rendering.
#[derive(Debug, Clone)]
pub struct AnalyzeResult {
    /// Process exit code (always 0 for a completed run).
    pub exit_code: i32,
    /// Rendered report for stdout.
    pub output:    String,
    /// Structured report the output was rendered from.
    pub report:    AnalysisReport
}
