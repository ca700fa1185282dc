//! Named SQL queries issued by the analysis.
//!
//! Every statement the analyzer sends to the database lives here as a
//! [`NamedQuery`] constant, so the metric code never embeds SQL text. The
//! metric queries are additionally parsed with [`sqlparser`] to derive the
//! set of tables they depend on, which the schema preflight checks before
//! anything runs.
//!
//! # Example
//!
//! ```
//! use airline_analyzer::catalog::{TICKETS_BY_DATE, required_tables};
//!
//! let tables = TICKETS_BY_DATE.referenced_tables().unwrap();
//! assert!(tables.contains("tickets"));
//! assert!(tables.contains("bookings"));
//!
//! let all = required_tables().unwrap();
//! assert!(all.contains("boarding_passes"));
//! ```

mod references;

use compact_str::CompactString;
use indexmap::IndexSet;
pub use references::referenced_tables;

use crate::error::AppResult;

/// A SQL statement with a stable name used in logs and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedQuery {
    pub name: &'static str,
    pub sql:  &'static str
}

impl NamedQuery {
    /// Tables referenced by the statement, lowercased, in first-seen order
    pub fn referenced_tables(&self) -> AppResult<IndexSet<CompactString>> {
        referenced_tables(self.name, self.sql)
    }
}

/// Tables defined in the database, in creation order
pub const LIST_TABLES: NamedQuery = NamedQuery {
    name: "list_tables",
    sql:  "SELECT name FROM sqlite_master WHERE type = 'table'"
};

/// Column metadata for the table bound to `?1`
pub const TABLE_COLUMNS: NamedQuery = NamedQuery {
    name: "table_columns",
    sql:  "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid"
};

pub const SEATS_PER_AIRCRAFT: NamedQuery = NamedQuery {
    name: "seats_per_aircraft",
    sql:  "SELECT aircraft_code, COUNT(*) AS num_seats \
           FROM seats \
           GROUP BY aircraft_code \
           ORDER BY aircraft_code"
};

pub const TICKETS_BY_DATE: NamedQuery = NamedQuery {
    name: "tickets_by_date",
    sql:  "SELECT substr(bookings.book_date, 1, 10) AS book_day, COUNT(*) AS tickets \
           FROM tickets \
           INNER JOIN bookings ON tickets.book_ref = bookings.book_ref \
           WHERE bookings.book_date IS NOT NULL \
           GROUP BY book_day \
           ORDER BY book_day"
};

pub const REVENUE_BY_DATE: NamedQuery = NamedQuery {
    name: "revenue_by_date",
    sql:  "SELECT substr(book_date, 1, 10) AS book_day, \
                  COALESCE(SUM(total_amount), 0) AS total_amount \
           FROM bookings \
           WHERE book_date IS NOT NULL \
           GROUP BY book_day \
           ORDER BY book_day"
};

pub const AVERAGE_FARES: NamedQuery = NamedQuery {
    name: "average_fares",
    sql:  "SELECT flights.aircraft_code, ticket_flights.fare_conditions, \
                  AVG(ticket_flights.amount) AS avg_amount \
           FROM ticket_flights \
           INNER JOIN flights ON ticket_flights.flight_id = flights.flight_id \
           GROUP BY flights.aircraft_code, ticket_flights.fare_conditions \
           ORDER BY flights.aircraft_code, ticket_flights.fare_conditions"
};

pub const REVENUE_BY_AIRCRAFT: NamedQuery = NamedQuery {
    name: "revenue_by_aircraft",
    sql:  "SELECT flights.aircraft_code, COUNT(*) AS ticket_count, \
                  COALESCE(SUM(ticket_flights.amount), 0) AS total_revenue \
           FROM ticket_flights \
           INNER JOIN flights ON ticket_flights.flight_id = flights.flight_id \
           GROUP BY flights.aircraft_code \
           ORDER BY flights.aircraft_code"
};

pub const BOOKED_SEATS_BY_AIRCRAFT: NamedQuery = NamedQuery {
    name: "booked_seats_by_aircraft",
    sql:  "SELECT loads.aircraft_code, COUNT(*) AS flights, AVG(loads.seat_count) AS booked_seats \
           FROM (SELECT flights.aircraft_code AS aircraft_code, flights.flight_id AS flight_id, \
                        COUNT(*) AS seat_count \
                 FROM boarding_passes \
                 INNER JOIN flights ON boarding_passes.flight_id = flights.flight_id \
                 GROUP BY flights.aircraft_code, flights.flight_id) AS loads \
           GROUP BY loads.aircraft_code \
           ORDER BY loads.aircraft_code"
};

/// Queries backing the metric calculator
pub const METRIC_QUERIES: [NamedQuery; 6] = [
    SEATS_PER_AIRCRAFT,
    TICKETS_BY_DATE,
    REVENUE_BY_DATE,
    AVERAGE_FARES,
    REVENUE_BY_AIRCRAFT,
    BOOKED_SEATS_BY_AIRCRAFT
];

/// Union of the tables referenced by all metric queries
pub fn required_tables() -> AppResult<IndexSet<CompactString>> {
    let mut tables = IndexSet::new();
    for query in &METRIC_QUERIES {
        tables.extend(query.referenced_tables()?);
    }
    Ok(tables)
}
