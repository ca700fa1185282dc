//! Business metrics over the booking data.
//!
//! The calculator issues the aggregate queries through [`BookingStore`] and
//! combines their rows in memory. Rows from independent queries are always
//! joined on the aircraft code, never by position.
//!
//! # Example
//!
//! ```
//! use airline_analyzer::{
//!     metrics::{Measure, OccupancyRate, project_uplift, revenue_per_ticket},
//!     store::RevenueTotals
//! };
//!
//! let revenue = revenue_per_ticket(&[RevenueTotals {
//!     aircraft_code: Some("A".into()),
//!     ticket_count:  4,
//!     total_revenue: 1000.0
//! }]);
//! let occupancy = [OccupancyRate {
//!     aircraft_code:  Some("A".into()),
//!     flights:        2,
//!     booked_seats:   1.0,
//!     num_seats:      2,
//!     occupancy_rate: Measure::Value(0.5)
//! }];
//!
//! let uplift = project_uplift(&occupancy, &revenue, 0.10);
//! let projection = uplift.rows[0].projection.value().unwrap();
//! assert!((projection.increased_turnover - 1100.0).abs() < 1e-9);
//! ```

mod types;

use compact_str::CompactString;
use indexmap::IndexMap;
use tracing::{debug, info};
pub use types::{
    AircraftRevenue, LargeAircraft, Measure, MetricsReport, NoData, OccupancyRate, Projection,
    UpliftReport, UpliftRow, ratio
};

use crate::{
    error::AppResult,
    store::{BookedSeats, BookingStore, RevenueTotals, SeatCount, key_or_null}
};

/// Tunables of the metric calculator
#[derive(Debug, Clone, Copy)]
pub struct MetricOptions {
    /// Relative occupancy increase for the uplift projection
    pub uplift_rate:          f64,
    /// Seat count above which an aircraft counts as large
    pub large_aircraft_seats: i64
}

impl Default for MetricOptions {
    fn default() -> Self {
        Self {
            uplift_rate:          0.10,
            large_aircraft_seats: 100
        }
    }
}

/// Run every metric query and derive the report
pub fn compute_metrics<S>(store: &S, opts: &MetricOptions) -> AppResult<MetricsReport>
where
    S: BookingStore + ?Sized
{
    let seats_per_aircraft = store.seats_per_aircraft()?;
    let large_aircraft = large_aircraft(&seats_per_aircraft, opts.large_aircraft_seats);
    let tickets_by_date = store.tickets_by_date()?;
    let revenue_by_date = store.revenue_by_date()?;
    let average_fares = store.average_fares()?;
    let revenue_per_aircraft = revenue_per_ticket(&store.revenue_by_aircraft()?);
    let occupancy = occupancy_rates(&store.booked_seats_by_aircraft()?, &seats_per_aircraft);
    let uplift = project_uplift(&occupancy, &revenue_per_aircraft, opts.uplift_rate);
    info!(
        aircraft = seats_per_aircraft.len(),
        days = tickets_by_date.len(),
        gain = uplift.turnover_gain,
        "metrics computed"
    );
    Ok(MetricsReport {
        seats_per_aircraft,
        large_aircraft,
        tickets_by_date,
        revenue_by_date,
        average_fares,
        revenue_per_aircraft,
        occupancy,
        uplift
    })
}

/// Aircraft codes with strictly more than `threshold` seats
pub fn large_aircraft(seats: &[SeatCount], threshold: i64) -> LargeAircraft {
    LargeAircraft {
        threshold,
        aircraft: seats
            .iter()
            .filter(|s| s.num_seats > threshold)
            .filter_map(|s| s.aircraft_code.clone())
            .collect()
    }
}

/// Attach the average revenue per ticket to each aircraft's totals
pub fn revenue_per_ticket(totals: &[RevenueTotals]) -> Vec<AircraftRevenue> {
    totals
        .iter()
        .map(|t| AircraftRevenue {
            aircraft_code:          t.aircraft_code.clone(),
            ticket_count:           t.ticket_count,
            total_revenue:          t.total_revenue,
            avg_revenue_per_ticket: ratio(
                t.total_revenue,
                t.ticket_count as f64,
                NoData::NoTickets
            )
        })
        .collect()
}

/// Divide each aircraft's average booked seats by its seat count.
///
/// One row per entry in `booked`; aircraft that never flew do not appear.
pub fn occupancy_rates(booked: &[BookedSeats], seats: &[SeatCount]) -> Vec<OccupancyRate> {
    let seat_map: IndexMap<&str, i64> = seats
        .iter()
        .filter_map(|s| Some((s.aircraft_code.as_deref()?, s.num_seats)))
        .collect();
    booked
        .iter()
        .map(|b| {
            let (num_seats, occupancy_rate) = match lookup(&seat_map, &b.aircraft_code) {
                Some(num_seats) => (
                    num_seats,
                    ratio(b.booked_seats, num_seats as f64, NoData::ZeroSeats)
                ),
                None => (0, Measure::NoData(NoData::MissingSeatMap))
            };
            if let Some(reason) = occupancy_rate.no_data() {
                debug!(aircraft = key_or_null(&b.aircraft_code), %reason, "occupancy unavailable");
            }
            OccupancyRate {
                aircraft_code: b.aircraft_code.clone(),
                flights: b.flights,
                booked_seats: b.booked_seats,
                num_seats,
                occupancy_rate
            }
        })
        .collect()
}

/// Project turnover if every aircraft's occupancy rose by `rate`.
///
/// Revenue is assumed to scale linearly with occupancy, so the revenue per
/// unit of occupancy is the same before and after the uplift.
pub fn project_uplift(
    occupancy: &[OccupancyRate],
    revenue: &[AircraftRevenue],
    rate: f64
) -> UpliftReport {
    let revenue_map: IndexMap<&str, f64> = revenue
        .iter()
        .filter_map(|r| Some((r.aircraft_code.as_deref()?, r.total_revenue)))
        .collect();
    let rows: Vec<UpliftRow> = occupancy
        .iter()
        .map(|o| {
            let total_revenue = match lookup(&revenue_map, &o.aircraft_code) {
                Some(total) => Measure::Value(total),
                None => Measure::NoData(NoData::MissingRevenue)
            };
            UpliftRow {
                aircraft_code: o.aircraft_code.clone(),
                occupancy_rate: o.occupancy_rate,
                total_revenue,
                projection: project_row(o.occupancy_rate, total_revenue, rate)
            }
        })
        .collect();

    let mut current_turnover = 0.0;
    let mut projected_turnover = 0.0;
    for row in &rows {
        if let (Some(total), Some(projection)) = (row.total_revenue.value(), row.projection.value())
        {
            current_turnover += total;
            projected_turnover += projection.increased_turnover;
        }
    }

    UpliftReport {
        rate,
        rows,
        current_turnover,
        projected_turnover,
        turnover_gain: projected_turnover - current_turnover
    }
}

/// Value joined on aircraft code; a NULL code never matches, as in SQL
fn lookup<V: Copy>(map: &IndexMap<&str, V>, code: &Option<CompactString>) -> Option<V> {
    code.as_deref().and_then(|c| map.get(c)).copied()
}

fn project_row(occupancy: Measure<f64>, revenue: Measure<f64>, rate: f64) -> Measure<Projection> {
    let occupancy = match occupancy {
        Measure::Value(v) => v,
        Measure::NoData(reason) => return Measure::NoData(reason)
    };
    let revenue = match revenue {
        Measure::Value(v) => v,
        Measure::NoData(reason) => return Measure::NoData(reason)
    };
    let increased_occupancy = occupancy + occupancy * rate;
    match ratio(revenue, occupancy, NoData::ZeroOccupancy) {
        Measure::Value(per_unit) => {
            let increased_turnover = per_unit * increased_occupancy;
            Measure::Value(Projection {
                increased_occupancy,
                increased_turnover,
                turnover_gain: increased_turnover - revenue
            })
        }
        Measure::NoData(reason) => Measure::NoData(reason)
    }
}
