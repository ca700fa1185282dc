//! Access to the booking database.
//!
//! [`BookingStore`] is the seam between the metric calculator and the
//! storage backend: each method runs exactly one aggregate query and returns
//! typed rows. [`SqliteStore`] implements it over a read-only SQLite
//! connection and additionally exposes the schema inspection queries.

mod ident;
mod rows;
mod sqlite;

pub use ident::quote_identifier;
pub use rows::{
    AverageFare, BookedSeats, DailyAmount, DailyCount, RevenueTotals, SeatCount, key_or_null
};
pub use sqlite::SqliteStore;

use crate::error::AppResult;

/// Aggregate queries the metric calculator depends on.
///
/// Implementations must return rows ordered by their grouping key.
pub trait BookingStore {
    /// Seat rows counted per aircraft code
    fn seats_per_aircraft(&self) -> AppResult<Vec<SeatCount>>;

    /// Tickets joined to bookings, counted per booking date
    fn tickets_by_date(&self) -> AppResult<Vec<DailyCount>>;

    /// Booking amounts summed per booking date
    fn revenue_by_date(&self) -> AppResult<Vec<DailyAmount>>;

    /// Average ticket amount per aircraft code and fare class
    fn average_fares(&self) -> AppResult<Vec<AverageFare>>;

    /// Ticket count and summed amount per aircraft code
    fn revenue_by_aircraft(&self) -> AppResult<Vec<RevenueTotals>>;

    /// Average boarding passes per flight, per aircraft code
    fn booked_seats_by_aircraft(&self) -> AppResult<Vec<BookedSeats>>;
}
