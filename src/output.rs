//! Report presentation.
//!
//! The text format mirrors a notebook walk-through: table listing, previews,
//! column metadata, null counts, then each metric table followed by its
//! chart. JSON and YAML serialise the whole [`AnalysisReport`] instead.

mod table;

use colored::Colorize;
use serde::Serialize;
pub use table::render_table;

use crate::{
    chart::{BarChart, ChartOptions, LineChart, render_bar_chart, render_line_chart},
    inspect::Inspection,
    metrics::{Measure, MetricsReport},
    store::{DailyAmount, DailyCount, key_or_null}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:    OutputFormat,
    pub colored:   bool,
    /// Render charts after their tables (text format only)
    pub charts:    bool,
    /// Rows shown for table previews and the date series
    pub head_rows: usize,
    pub chart:     ChartOptions
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:    OutputFormat::Text,
            colored:   true,
            charts:    true,
            head_rows: 5,
            chart:     ChartOptions::default()
        }
    }
}

/// Complete result of an analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub database:   String,
    pub inspection: Inspection,
    pub metrics:    MetricsReport
}

/// Format the report based on output options
pub fn format_report(report: &AnalysisReport, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(report).unwrap_or_default(),
        OutputFormat::Text => {
            let mut out = format_inspection(&report.inspection, opts);
            out.push_str(&format_metrics(&report.metrics, opts));
            out
        }
    }
}

/// Table listing, previews, column metadata and null counts as text
pub fn format_inspection(inspection: &Inspection, opts: &OutputOptions) -> String {
    let mut out = section("List of tables present in database:", opts);
    let names: Vec<&str> = inspection.tables.iter().map(|t| t.name.as_str()).collect();
    out.push_str(&format!("  [{}]\n\n", names.join(", ")));

    for preview in &inspection.previews {
        out.push_str(&section(&format!("Loaded {}:", preview.table), opts));
        let headers: Vec<&str> = preview.columns.iter().map(|c| c.as_str()).collect();
        out.push_str(&render_table(&headers, &preview.rows, opts.colored));
        out.push('\n');
    }

    out.push_str(&section("Column information:", opts));
    for schema in &inspection.tables {
        out.push_str(&format!("Table: {}\n", schema.name));
        let rows: Vec<Vec<String>> = schema
            .columns
            .iter()
            .map(|c| {
                let mut flags = Vec::new();
                if c.primary_key {
                    flags.push("pk");
                }
                if c.not_null {
                    flags.push("not null");
                }
                vec![c.name.to_string(), c.data_type.to_string(), flags.join(", ")]
            })
            .collect();
        out.push_str(&render_table(&["column", "type", "flags"], &rows, opts.colored));
        out.push('\n');
    }

    out.push_str(&section("Null values by table:", opts));
    for profile in &inspection.null_profiles {
        out.push_str(&format!(
            "Table: {} (rows: {}, null cells: {})\n",
            profile.table,
            profile.row_count,
            profile.total_nulls()
        ));
        let rows: Vec<Vec<String>> = profile
            .columns
            .iter()
            .map(|c| vec![c.column.to_string(), c.nulls.to_string()])
            .collect();
        out.push_str(&render_table(&["column", "nulls"], &rows, opts.colored));
        out.push('\n');
    }
    out
}

/// Metric tables, each followed by its chart when enabled
pub fn format_metrics(metrics: &MetricsReport, opts: &OutputOptions) -> String {
    let chart_opts = ChartOptions {
        colored: opts.colored,
        ..opts.chart
    };

    let mut out = section("Seats per aircraft:", opts);
    let rows: Vec<Vec<String>> = metrics
        .seats_per_aircraft
        .iter()
        .map(|s| vec![key_or_null(&s.aircraft_code).to_string(), s.num_seats.to_string()])
        .collect();
    out.push_str(&render_table(&["aircraft_code", "num_seats"], &rows, opts.colored));
    let large: Vec<&str> = metrics
        .large_aircraft
        .aircraft
        .iter()
        .map(|c| c.as_str())
        .collect();
    out.push_str(&format!(
        "  Aircraft with more than {} seats: {}\n\n",
        metrics.large_aircraft.threshold,
        if large.is_empty() { String::from("none") } else { large.join(", ") }
    ));

    out.push_str(&section("Tickets count by date:", opts));
    out.push_str(&format_daily_counts(&metrics.tickets_by_date, opts));
    if opts.charts {
        out.push('\n');
        out.push_str(&render_line_chart(
            &LineChart::tickets_by_date(&metrics.tickets_by_date),
            &chart_opts
        ));
    }
    out.push('\n');

    out.push_str(&section("Total amount earned by date:", opts));
    out.push_str(&format_daily_amounts(&metrics.revenue_by_date, opts));
    if opts.charts {
        out.push('\n');
        out.push_str(&render_line_chart(
            &LineChart::revenue_by_date(&metrics.revenue_by_date),
            &chart_opts
        ));
    }
    out.push('\n');

    out.push_str(&section("Average charges by aircraft and fare conditions:", opts));
    let rows: Vec<Vec<String>> = metrics
        .average_fares
        .iter()
        .map(|f| {
            vec![
                key_or_null(&f.aircraft_code).to_string(),
                f.avg_amount.map(format_amount).unwrap_or_else(|| String::from("NULL")),
                key_or_null(&f.fare_conditions).to_string()
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["aircraft_code", "avg_amount", "fare_conditions"],
        &rows,
        opts.colored
    ));
    if opts.charts {
        out.push('\n');
        out.push_str(&render_bar_chart(
            &BarChart::average_fares(&metrics.average_fares),
            &chart_opts
        ));
    }
    out.push('\n');

    out.push_str(&section("Total revenue and average revenue per ticket:", opts));
    let rows: Vec<Vec<String>> = metrics
        .revenue_per_aircraft
        .iter()
        .map(|r| {
            vec![
                key_or_null(&r.aircraft_code).to_string(),
                r.ticket_count.to_string(),
                format_amount(r.total_revenue),
                format_measure(r.avg_revenue_per_ticket, format_amount),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["aircraft_code", "ticket_count", "total_revenue", "avg_revenue_per_ticket"],
        &rows,
        opts.colored
    ));
    out.push('\n');

    out.push_str(&section("Occupancy rate per aircraft:", opts));
    let rows: Vec<Vec<String>> = metrics
        .occupancy
        .iter()
        .map(|o| {
            vec![
                key_or_null(&o.aircraft_code).to_string(),
                o.flights.to_string(),
                format!("{:.2}", o.booked_seats),
                o.num_seats.to_string(),
                format_measure(o.occupancy_rate, format_rate),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["aircraft_code", "flights", "booked_seats", "num_seats", "occupancy_rate"],
        &rows,
        opts.colored
    ));
    out.push('\n');

    let uplift = &metrics.uplift;
    out.push_str(&section(
        &format!(
            "Total turnover with {}% higher occupancy rate:",
            format_percent(uplift.rate)
        ),
        opts
    ));
    let rows: Vec<Vec<String>> = uplift
        .rows
        .iter()
        .map(|u| {
            let projection = u.projection.value();
            vec![
                key_or_null(&u.aircraft_code).to_string(),
                format_measure(u.occupancy_rate, format_rate),
                format_measure(u.total_revenue, format_amount),
                projection
                    .map(|p| format_rate(p.increased_occupancy))
                    .unwrap_or_else(|| format_measure(u.projection, |_| String::new())),
                projection
                    .map(|p| format_amount(p.increased_turnover))
                    .unwrap_or_default(),
                projection
                    .map(|p| format_amount(p.turnover_gain))
                    .unwrap_or_default(),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &[
            "aircraft_code",
            "occupancy_rate",
            "total_revenue",
            "inc_occupancy_rate",
            "inc_total_turnover",
            "turnover_gain"
        ],
        &rows,
        opts.colored
    ));
    let summary = format!(
        "  Fleet turnover: current {}, projected {}, gain {}\n",
        format_amount(uplift.current_turnover),
        format_amount(uplift.projected_turnover),
        format_amount(uplift.turnover_gain)
    );
    if opts.colored {
        out.push_str(&summary.green().to_string());
    } else {
        out.push_str(&summary);
    }
    out
}

fn format_daily_counts(rows: &[DailyCount], opts: &OutputOptions) -> String {
    let shown: Vec<Vec<String>> = rows
        .iter()
        .take(opts.head_rows)
        .map(|r| vec![r.date.to_string(), r.tickets.to_string()])
        .collect();
    let mut out = render_table(&["date", "tickets"], &shown, opts.colored);
    out.push_str(&more_rows(rows.len(), shown.len()));
    out
}

fn format_daily_amounts(rows: &[DailyAmount], opts: &OutputOptions) -> String {
    let shown: Vec<Vec<String>> = rows
        .iter()
        .take(opts.head_rows)
        .map(|r| vec![r.date.to_string(), format_amount(r.total_amount)])
        .collect();
    let mut out = render_table(&["date", "total_amount"], &shown, opts.colored);
    out.push_str(&more_rows(rows.len(), shown.len()));
    out
}

fn more_rows(total: usize, shown: usize) -> String {
    if total > shown {
        format!("  ... {} more rows\n", total - shown)
    } else {
        String::new()
    }
}

fn section(title: &str, opts: &OutputOptions) -> String {
    if opts.colored {
        format!("{}\n", title.cyan().bold())
    } else {
        format!("{}\n", title)
    }
}

/// Format a measure, or `n/a (<reason>)` when it has no value
pub fn format_measure<T: Copy>(measure: Measure<T>, format: impl Fn(T) -> String) -> String {
    match measure {
        Measure::Value(v) => format(v),
        Measure::NoData(reason) => format!("n/a ({})", reason)
    }
}

/// Currency-style amount with two decimals
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Fraction with four decimals
pub fn format_rate(value: f64) -> String {
    format!("{:.4}", value)
}

/// Fraction as a percentage without trailing zeros, `0.1` → `10`
pub fn format_percent(rate: f64) -> String {
    let text = format!("{:.2}", rate * 100.0);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
