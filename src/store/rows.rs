use chrono::NaiveDate;
use compact_str::CompactString;
use serde::Serialize;

/// Display text of a grouping key, `NULL` for the group of missing keys
pub fn key_or_null(key: &Option<CompactString>) -> &str {
    key.as_deref().unwrap_or("NULL")
}

/// Number of seats configured on an aircraft type.
///
/// Grouping keys are optional throughout: rows with a NULL key form their
/// own group, as they do in SQL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatCount {
    pub aircraft_code: Option<CompactString>,
    pub num_seats:     i64
}

/// Tickets sold on a booking date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCount {
    pub date:    NaiveDate,
    pub tickets: i64
}

/// Booking amount earned on a booking date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAmount {
    pub date:         NaiveDate,
    pub total_amount: f64
}

/// Average fare for one aircraft type and fare class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageFare {
    pub aircraft_code:   Option<CompactString>,
    pub fare_conditions: Option<CompactString>,
    /// `None` when every amount in the group is NULL
    pub avg_amount:      Option<f64>
}

/// Raw ticket totals for an aircraft type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueTotals {
    pub aircraft_code: Option<CompactString>,
    pub ticket_count:  i64,
    pub total_revenue: f64
}

/// Average seats booked per flight for an aircraft type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookedSeats {
    pub aircraft_code: Option<CompactString>,
    /// Flights with at least one boarding pass
    pub flights:       i64,
    pub booked_seats:  f64
}
