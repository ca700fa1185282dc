//! Derived metric types.
//!
//! Every ratio the calculator produces is wrapped in [`Measure`], so a
//! division that has no meaningful denominator is reported as
//! [`Measure::NoData`] with a reason instead of a NaN or a panic.

use std::fmt;

use compact_str::CompactString;
use serde::Serialize;

use crate::store::{AverageFare, DailyAmount, DailyCount, SeatCount};

/// Why a derived value could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoData {
    /// Aircraft has revenue rows but a ticket count of zero
    NoTickets,
    /// Aircraft seat map exists but has no seats
    ZeroSeats,
    /// Aircraft flew but has no seat map
    MissingSeatMap,
    /// Occupancy is zero, so revenue cannot be rescaled
    ZeroOccupancy,
    /// Aircraft has occupancy but no ticket revenue
    MissingRevenue
}

impl fmt::Display for NoData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTickets => write!(f, "no tickets"),
            Self::ZeroSeats => write!(f, "zero seats"),
            Self::MissingSeatMap => write!(f, "no seat map"),
            Self::ZeroOccupancy => write!(f, "zero occupancy"),
            Self::MissingRevenue => write!(f, "no revenue")
        }
    }
}

/// A derived value or the reason it is absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure<T> {
    Value(T),
    NoData(NoData)
}

impl<T: Copy> Measure<T> {
    /// The value, if one was computed
    pub fn value(&self) -> Option<T> {
        match self {
            Self::Value(v) => Some(*v),
            Self::NoData(_) => None
        }
    }

    /// The reason no value was computed
    pub fn no_data(&self) -> Option<NoData> {
        match self {
            Self::Value(_) => None,
            Self::NoData(reason) => Some(*reason)
        }
    }
}

/// Ratio of two quantities, `NoData(reason)` when the denominator is zero
pub fn ratio(numerator: f64, denominator: f64, reason: NoData) -> Measure<f64> {
    if denominator == 0.0 {
        Measure::NoData(reason)
    } else {
        Measure::Value(numerator / denominator)
    }
}

/// Revenue of an aircraft type with its per-ticket average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AircraftRevenue {
    pub aircraft_code:          Option<CompactString>,
    pub ticket_count:           i64,
    pub total_revenue:          f64,
    pub avg_revenue_per_ticket: Measure<f64>
}

/// Average load of an aircraft type relative to its seat count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyRate {
    pub aircraft_code:  Option<CompactString>,
    pub flights:        i64,
    pub booked_seats:   f64,
    /// Zero when the aircraft has no seat map
    pub num_seats:      i64,
    /// Fraction of seats booked, not a percentage
    pub occupancy_rate: Measure<f64>
}

/// Occupancy and turnover after the uplift is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub increased_occupancy: f64,
    pub increased_turnover:  f64,
    pub turnover_gain:       f64
}

/// Uplift outcome for one aircraft type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpliftRow {
    pub aircraft_code:  Option<CompactString>,
    pub occupancy_rate: Measure<f64>,
    pub total_revenue:  Measure<f64>,
    pub projection:     Measure<Projection>
}

/// Fleet-wide uplift projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpliftReport {
    /// Relative occupancy increase, `0.10` for ten percent
    pub rate:               f64,
    pub rows:               Vec<UpliftRow>,
    /// Revenue of the aircraft that could be projected
    pub current_turnover:   f64,
    pub projected_turnover: f64,
    pub turnover_gain:      f64
}

/// All business metrics of a run.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub seats_per_aircraft:   Vec<SeatCount>,
    pub large_aircraft:       LargeAircraft,
    pub tickets_by_date:      Vec<DailyCount>,
    pub revenue_by_date:      Vec<DailyAmount>,
    pub average_fares:        Vec<AverageFare>,
    pub revenue_per_aircraft: Vec<AircraftRevenue>,
    pub occupancy:            Vec<OccupancyRate>,
    pub uplift:               UpliftReport
}

/// Aircraft types with more seats than a threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LargeAircraft {
    pub threshold: i64,
    /// Seat rows without an aircraft code are never listed
    pub aircraft:  Vec<CompactString>
}
