//! Terminal charts.
//!
//! Charts are drawn as plain text so they can be printed inline with the
//! report: a line chart for values over time and a grouped horizontal bar
//! chart for per-aircraft comparisons.
//!
//! # Example
//!
//! ```
//! use airline_analyzer::chart::{ChartOptions, LineChart, render_line_chart};
//!
//! let chart = LineChart {
//!     title:   "Tickets",
//!     x_label: "Date",
//!     y_label: "Count",
//!     points:  vec![("d1".into(), 1.0), ("d2".into(), 3.0), ("d3".into(), 2.0)]
//! };
//! let opts = ChartOptions {
//!     width:   20,
//!     height:  5,
//!     colored: false
//! };
//! let text = render_line_chart(&chart, &opts);
//! assert!(text.contains("Tickets"));
//! ```

use colored::{Color, Colorize};
use compact_str::CompactString;
use indexmap::IndexSet;
use smallvec::SmallVec;

use crate::store::{AverageFare, DailyAmount, DailyCount, key_or_null};

const POINT: char = '*';
const CONNECTOR: char = '|';
const BAR: char = '█';
const NO_DATA: &str = "  (no data)\n";
const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red
];

/// Plot area size and styling
#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    /// Maximum number of plotted columns (line) or bar length (bar)
    pub width:   usize,
    /// Number of rows of the plot area (line chart only)
    pub height:  usize,
    pub colored: bool
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width:   60,
            height:  12,
            colored: true
        }
    }
}

/// A series of labelled values plotted left to right.
#[derive(Debug, Clone)]
pub struct LineChart<'a> {
    pub title:   &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub points:  Vec<(String, f64)>
}

impl LineChart<'static> {
    /// Ticket count per booking date
    pub fn tickets_by_date(rows: &[DailyCount]) -> Self {
        Self {
            title:   "Count of Tickets by Date",
            x_label: "Date",
            y_label: "Count of Tickets",
            points:  rows
                .iter()
                .map(|r| (r.date.to_string(), r.tickets as f64))
                .collect()
        }
    }

    /// Booking amount per booking date
    pub fn revenue_by_date(rows: &[DailyAmount]) -> Self {
        Self {
            title:   "Total Amount Earned by Date",
            x_label: "Date",
            y_label: "Total Amount Earned",
            points:  rows
                .iter()
                .map(|r| (r.date.to_string(), r.total_amount))
                .collect()
        }
    }
}

/// One bar of a group.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub series: CompactString,
    pub value:  f64
}

/// Bars sharing a label, e.g. all fare classes of one aircraft.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: CompactString,
    pub bars:  SmallVec<[Bar; 4]>
}

/// Grouped horizontal bar chart.
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    pub title:  &'a str,
    pub groups: Vec<BarGroup>
}

impl BarChart<'static> {
    /// Average fare per aircraft, one bar per fare class.
    ///
    /// Groups with a NULL average are skipped.
    pub fn average_fares(rows: &[AverageFare]) -> Self {
        let mut groups: Vec<BarGroup> = Vec::new();
        for row in rows {
            let Some(value) = row.avg_amount else {
                continue;
            };
            let bar = Bar {
                series: key_or_null(&row.fare_conditions).into(),
                value
            };
            match groups.last_mut() {
                Some(group) if group.label == key_or_null(&row.aircraft_code) => group.bars.push(bar),
                _ => {
                    let mut bars = SmallVec::new();
                    bars.push(bar);
                    groups.push(BarGroup {
                        label: key_or_null(&row.aircraft_code).into(),
                        bars
                    });
                }
            }
        }
        Self {
            title: "Average Charges by Aircraft and Fare Conditions",
            groups
        }
    }
}

/// Draw a line chart; series longer than `opts.width` are bucketed by mean.
pub fn render_line_chart(chart: &LineChart<'_>, opts: &ChartOptions) -> String {
    let mut out = title_line(chart.title, opts.colored);
    let values: Vec<f64> = chart.points.iter().map(|(_, v)| *v).collect();
    let columns = bucket_means(&values, opts.width.max(1));
    if columns.is_empty() {
        out.push_str(NO_DATA);
        return out;
    }

    let height = opts.height.max(2);
    let min = columns.iter().copied().fold(f64::INFINITY, f64::min);
    let max = columns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let rows: Vec<usize> = columns
        .iter()
        .map(|v| scale_row(*v, min, max, height))
        .collect();

    let mut grid = vec![vec![' '; columns.len()]; height];
    for (col, &row) in rows.iter().enumerate() {
        if col > 0 {
            let prev = rows[col - 1];
            let (low, high) = (prev.min(row), prev.max(row));
            for cell in grid.iter_mut().take(high).skip(low + 1) {
                cell[col] = CONNECTOR;
            }
        }
        grid[row][col] = POINT;
    }

    let top = compact_number(max);
    let bottom = compact_number(min);
    let label_width = top.len().max(bottom.len());
    for (idx, line) in grid.iter().enumerate().rev() {
        let label = if idx == height - 1 {
            top.as_str()
        } else if idx == 0 {
            bottom.as_str()
        } else {
            ""
        };
        out.push_str(&format!("{:>w$} |", label, w = label_width));
        for &cell in line {
            if cell == POINT && opts.colored {
                out.push_str(&POINT.to_string().cyan().to_string());
            } else {
                out.push(cell);
            }
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "{:>w$} +{}\n",
        "",
        "-".repeat(columns.len()),
        w = label_width
    ));

    let first = chart.points.first().map(|(l, _)| l.as_str()).unwrap_or_default();
    let last = chart.points.last().map(|(l, _)| l.as_str()).unwrap_or_default();
    let gap = columns
        .len()
        .saturating_sub(first.len() + last.len())
        .max(1);
    if chart.points.len() > 1 {
        out.push_str(&format!(
            "{:>w$}  {}{}{}\n",
            "",
            first,
            " ".repeat(gap),
            last,
            w = label_width
        ));
    } else {
        out.push_str(&format!("{:>w$}  {}\n", "", first, w = label_width));
    }
    out.push_str(&format!(
        "{:>w$}  x: {}, y: {}\n",
        "",
        chart.x_label,
        chart.y_label,
        w = label_width
    ));
    out
}

/// Draw a grouped bar chart scaled so the largest bar spans `opts.width`.
pub fn render_bar_chart(chart: &BarChart<'_>, opts: &ChartOptions) -> String {
    let mut out = title_line(chart.title, opts.colored);
    let bars: Vec<&Bar> = chart.groups.iter().flat_map(|g| g.bars.iter()).collect();
    if bars.is_empty() {
        out.push_str(NO_DATA);
        return out;
    }

    let series: IndexSet<&str> = bars.iter().map(|b| b.series.as_str()).collect();
    let max = bars
        .iter()
        .map(|b| b.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let group_width = chart
        .groups
        .iter()
        .map(|g| g.label.len())
        .max()
        .unwrap_or(0);
    let series_width = series.iter().map(|s| s.len()).max().unwrap_or(0);

    for group in &chart.groups {
        for (idx, bar) in group.bars.iter().enumerate() {
            let label = if idx == 0 { group.label.as_str() } else { "" };
            let length = bar_length(bar.value, max, opts.width);
            let body = BAR.to_string().repeat(length);
            let body = if opts.colored {
                let color_idx = series.get_index_of(bar.series.as_str()).unwrap_or(0);
                body.color(SERIES_COLORS[color_idx % SERIES_COLORS.len()])
                    .to_string()
            } else {
                body
            };
            out.push_str(&format!(
                "  {:<gw$} {:<sw$} |{} {:.2}\n",
                label,
                bar.series,
                body,
                bar.value,
                gw = group_width,
                sw = series_width
            ));
        }
    }
    out
}

fn title_line(title: &str, colored: bool) -> String {
    if colored {
        format!("{}\n", title.bold())
    } else {
        format!("{}\n", title)
    }
}

/// Reduce `values` to at most `width` columns, each the mean of its bucket
fn bucket_means(values: &[f64], width: usize) -> Vec<f64> {
    let n = values.len();
    if n <= width {
        return values.to_vec();
    }
    (0..width)
        .map(|col| {
            let start = col * n / width;
            let end = (col + 1) * n / width;
            let bucket = &values[start..end];
            bucket.iter().sum::<f64>() / bucket.len() as f64
        })
        .collect()
}

/// Row index of `value` in a plot of `height` rows, 0 being the bottom
fn scale_row(value: f64, min: f64, max: f64, height: usize) -> usize {
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        return height / 2;
    }
    let scaled = ((value - min) / span * (height - 1) as f64).round();
    (scaled.max(0.0) as usize).min(height - 1)
}

fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

fn compact_number(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else if abs >= 10.0 || value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
