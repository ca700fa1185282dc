use std::{path::Path, time::Instant};

use chrono::NaiveDate;
use compact_str::CompactString;
use rusqlite::{Connection, OpenFlags, Params, Row, types::ValueRef};
use tracing::debug;

use super::{
    AverageFare, BookedSeats, BookingStore, DailyAmount, DailyCount, RevenueTotals, SeatCount,
    quote_identifier
};
use crate::{
    catalog::{
        AVERAGE_FARES, BOOKED_SEATS_BY_AIRCRAFT, LIST_TABLES, NamedQuery, REVENUE_BY_AIRCRAFT,
        REVENUE_BY_DATE, SEATS_PER_AIRCRAFT, TABLE_COLUMNS, TICKETS_BY_DATE
    },
    error::{AppResult, database_open_error, date_parse_error, query_error},
    inspect::{ColumnInfo, NullCount, NullProfile, TablePreview}
};

/// Read-only handle on the booking database.
///
/// The connection is held for the lifetime of the store and closed on drop.
pub struct SqliteStore {
    conn:     Connection,
    location: String
}

impl SqliteStore {
    /// Open an existing database file read-only
    ///
    /// # Errors
    ///
    /// Returns error if the file does not exist or SQLite cannot open it
    pub fn open(path: &Path) -> AppResult<Self> {
        let location = path.display().to_string();
        if !path.is_file() {
            return Err(database_open_error(&location, "file not found"));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        )
        .map_err(|e| database_open_error(&location, e))?;
        debug!(path = %location, "opened database");
        Ok(Self {
            conn,
            location
        })
    }

    /// Wrap an already open connection
    pub fn from_connection(conn: Connection) -> Self {
        let location = conn
            .path()
            .filter(|p| !p.is_empty())
            .unwrap_or(":memory:")
            .to_string();
        Self {
            conn,
            location
        }
    }

    /// Path of the underlying database
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Names of all tables, in creation order
    pub fn list_tables(&self) -> AppResult<Vec<CompactString>> {
        self.collect(&LIST_TABLES, [], |row| {
            Ok(CompactString::from(row.get::<_, String>(0)?))
        })
    }

    /// Column metadata of a table, in declaration order
    pub fn table_columns(&self, table: &str) -> AppResult<Vec<ColumnInfo>> {
        self.collect(&TABLE_COLUMNS, [table], |row| {
            Ok(ColumnInfo {
                name:        row.get::<_, String>(0)?.into(),
                data_type:   row.get::<_, String>(1)?.into(),
                not_null:    row.get::<_, i64>(2)? != 0,
                primary_key: row.get::<_, i64>(3)? > 0
            })
        })
    }

    /// First `limit` rows of a table rendered as text
    pub fn preview(&self, table: &str, limit: usize) -> AppResult<TablePreview> {
        let sql = format!("SELECT * FROM {} LIMIT ?1", quote_identifier(table)?);
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| query_error("preview", e))?;
        let columns: Vec<CompactString> = stmt.column_names().into_iter().map(Into::into).collect();
        let width = columns.len();
        let mut rows = stmt
            .query([i64::try_from(limit).unwrap_or(i64::MAX)])
            .map_err(|e| query_error("preview", e))?;
        let mut rendered = Vec::new();
        while let Some(row) = rows.next().map_err(|e| query_error("preview", e))? {
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                let value = row.get_ref(idx).map_err(|e| query_error("preview", e))?;
                values.push(render_value(value));
            }
            rendered.push(values);
        }
        debug!(table, rows = rendered.len(), "previewed table");
        Ok(TablePreview {
            table: table.into(),
            columns,
            rows: rendered
        })
    }

    /// Row count and per-column NULL counts of a table, in one pass
    pub fn null_profile(&self, table: &str, columns: &[ColumnInfo]) -> AppResult<NullProfile> {
        let mut select = vec![String::from("COUNT(*)")];
        for column in columns {
            select.push(format!(
                "SUM(CASE WHEN {} IS NULL THEN 1 ELSE 0 END)",
                quote_identifier(&column.name)?
            ));
        }
        let sql = format!(
            "SELECT {} FROM {}",
            select.join(", "),
            quote_identifier(table)?
        );
        let started = Instant::now();
        let (row_count, nulls) = self
            .conn
            .query_row(&sql, [], |row| {
                let row_count: i64 = row.get(0)?;
                let mut nulls = Vec::with_capacity(columns.len());
                for (idx, column) in columns.iter().enumerate() {
                    nulls.push(NullCount {
                        column: column.name.clone(),
                        nulls:  row.get::<_, Option<i64>>(idx + 1)?.unwrap_or(0)
                    });
                }
                Ok((row_count, nulls))
            })
            .map_err(|e| query_error("null_profile", e))?;
        debug!(
            table,
            row_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "profiled nulls"
        );
        Ok(NullProfile {
            table: table.into(),
            row_count,
            columns: nulls
        })
    }

    fn collect<T, P, F>(&self, query: &NamedQuery, params: P, map: F) -> AppResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>
    {
        let started = Instant::now();
        let mut stmt = self
            .conn
            .prepare(query.sql)
            .map_err(|e| query_error(query.name, e))?;
        let rows = stmt
            .query_map(params, map)
            .map_err(|e| query_error(query.name, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| query_error(query.name, e))?;
        debug!(
            query = query.name,
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "query finished"
        );
        Ok(rows)
    }
}

impl BookingStore for SqliteStore {
    fn seats_per_aircraft(&self) -> AppResult<Vec<SeatCount>> {
        self.collect(&SEATS_PER_AIRCRAFT, [], |row| {
            Ok(SeatCount {
                aircraft_code: row.get::<_, Option<String>>(0)?.map(Into::into),
                num_seats:     row.get(1)?
            })
        })
    }

    fn tickets_by_date(&self) -> AppResult<Vec<DailyCount>> {
        let raw = self.collect(&TICKETS_BY_DATE, [], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        raw.into_iter()
            .map(|(day, tickets)| {
                Ok(DailyCount {
                    date: parse_day(&day)?,
                    tickets
                })
            })
            .collect()
    }

    fn revenue_by_date(&self) -> AppResult<Vec<DailyAmount>> {
        let raw = self.collect(&REVENUE_BY_DATE, [], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;
        raw.into_iter()
            .map(|(day, total_amount)| {
                Ok(DailyAmount {
                    date: parse_day(&day)?,
                    total_amount
                })
            })
            .collect()
    }

    fn average_fares(&self) -> AppResult<Vec<AverageFare>> {
        self.collect(&AVERAGE_FARES, [], |row| {
            Ok(AverageFare {
                aircraft_code:   row.get::<_, Option<String>>(0)?.map(Into::into),
                fare_conditions: row.get::<_, Option<String>>(1)?.map(Into::into),
                avg_amount:      row.get(2)?
            })
        })
    }

    fn revenue_by_aircraft(&self) -> AppResult<Vec<RevenueTotals>> {
        self.collect(&REVENUE_BY_AIRCRAFT, [], |row| {
            Ok(RevenueTotals {
                aircraft_code: row.get::<_, Option<String>>(0)?.map(Into::into),
                ticket_count:  row.get(1)?,
                total_revenue: row.get(2)?
            })
        })
    }

    fn booked_seats_by_aircraft(&self) -> AppResult<Vec<BookedSeats>> {
        self.collect(&BOOKED_SEATS_BY_AIRCRAFT, [], |row| {
            Ok(BookedSeats {
                aircraft_code: row.get::<_, Option<String>>(0)?.map(Into::into),
                flights:       row.get(1)?,
                booked_seats:  row.get(2)?
            })
        })
    }
}

/// Parse the `YYYY-MM-DD` prefix produced by `substr(book_date, 1, 10)`
fn parse_day(day: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| date_parse_error(day))
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::from("NULL"),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => format!("<{} bytes>", bytes.len())
    }
}
