#![allow(dead_code)]

use std::path::{Path, PathBuf};

use airline_analyzer::store::SqliteStore;
use rusqlite::Connection;
use tempfile::TempDir;

pub const SCHEMA: &str = r#"
CREATE TABLE aircrafts_data (
    aircraft_code character(3) NOT NULL PRIMARY KEY,
    model jsonb NOT NULL,
    range integer NOT NULL
);
CREATE TABLE airports_data (
    airport_code character(3) NOT NULL PRIMARY KEY,
    airport_name jsonb NOT NULL,
    city jsonb NOT NULL,
    coordinates point NOT NULL,
    timezone text
);
CREATE TABLE boarding_passes (
    ticket_no character(13) NOT NULL,
    flight_id integer NOT NULL,
    boarding_no integer NOT NULL,
    seat_no character varying(4) NOT NULL
);
CREATE TABLE bookings (
    book_ref character(6) NOT NULL PRIMARY KEY,
    book_date timestamp with time zone NOT NULL,
    total_amount numeric(10,2) NOT NULL
);
CREATE TABLE flights (
    flight_id integer NOT NULL PRIMARY KEY,
    flight_no character(6) NOT NULL,
    scheduled_departure timestamp with time zone NOT NULL,
    scheduled_arrival timestamp with time zone NOT NULL,
    departure_airport character(3) NOT NULL,
    arrival_airport character(3) NOT NULL,
    status character varying(20) NOT NULL,
    aircraft_code character(3) NOT NULL,
    actual_departure timestamp with time zone,
    actual_arrival timestamp with time zone
);
CREATE TABLE seats (
    aircraft_code character(3) NOT NULL,
    seat_no character varying(4) NOT NULL,
    fare_conditions character varying(10) NOT NULL
);
CREATE TABLE ticket_flights (
    ticket_no character(13) NOT NULL,
    flight_id integer NOT NULL,
    fare_conditions character varying(10) NOT NULL,
    amount numeric(10,2) NOT NULL
);
CREATE TABLE tickets (
    ticket_no character(13) NOT NULL PRIMARY KEY,
    book_ref character(6) NOT NULL,
    passenger_id character varying(20) NOT NULL
);
"#;

pub const DATA: &str = r#"
INSERT INTO aircrafts_data VALUES
    ('A', '{"en": "Alpha 100"}', 3000),
    ('B', '{"en": "Bravo 200"}', 5000);
INSERT INTO airports_data VALUES
    ('AAA', '{"en": "Alpha Field"}', '{"en": "Alpha City"}', '(37.9,55.4)', 'Europe/Moscow'),
    ('BBB', '{"en": "Bravo Field"}', '{"en": "Bravo City"}', '(30.2,59.8)', NULL);
INSERT INTO seats VALUES
    ('A', '1A', 'Economy'),
    ('A', '1B', 'Business'),
    ('B', '1A', 'Economy'),
    ('B', '1B', 'Economy'),
    ('B', '2A', 'Business');
INSERT INTO flights VALUES
    (1, 'PG0001', '2024-01-05 09:00:00+03', '2024-01-05 11:00:00+03', 'AAA', 'BBB', 'Arrived', 'A',
     '2024-01-05 09:05:00+03', '2024-01-05 11:02:00+03'),
    (2, 'PG0002', '2024-01-06 09:00:00+03', '2024-01-06 11:00:00+03', 'BBB', 'AAA', 'Arrived', 'A',
     '2024-01-06 09:01:00+03', '2024-01-06 10:58:00+03'),
    (3, 'PG0003', '2024-01-07 09:00:00+03', '2024-01-07 12:00:00+03', 'AAA', 'BBB', 'Scheduled', 'B',
     NULL, NULL);
INSERT INTO bookings VALUES
    ('B00001', '2024-01-01 10:00:00+03', 100),
    ('B00002', '2024-01-01 18:30:00+03', 50),
    ('B00003', '2024-01-02 09:00:00+03', 300);
INSERT INTO tickets VALUES
    ('T1', 'B00001', 'P1'),
    ('T2', 'B00002', 'P2'),
    ('T3', 'B00003', 'P3'),
    ('T4', 'B00003', 'P4');
INSERT INTO ticket_flights VALUES
    ('T1', 1, 'Economy', 100),
    ('T2', 2, 'Business', 300),
    ('T3', 3, 'Economy', 200),
    ('T4', 3, 'Economy', 100);
INSERT INTO boarding_passes VALUES
    ('T1', 1, 1, '1A'),
    ('T2', 2, 1, '1B'),
    ('T3', 3, 1, '1A'),
    ('T4', 3, 2, '1B');
"#;

/// Write the fixture database to `path`, optionally without some tables
pub fn write_fixture(path: &Path, skip_tables: &[&str]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn.execute_batch(DATA).unwrap();
    for table in skip_tables {
        conn.execute_batch(&format!("DROP TABLE {};", table)).unwrap();
    }
}

/// Fixture database in a fresh temporary directory
pub fn fixture_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("travel.sqlite");
    write_fixture(&path, &[]);
    (dir, path)
}

/// Read-only store over a fresh fixture database
pub fn fixture_store() -> (TempDir, SqliteStore) {
    let (dir, path) = fixture_db();
    let store = SqliteStore::open(&path).unwrap();
    (dir, store)
}

/// In-memory store over the fixture schema without `NOT NULL` constraints,
/// filled by `inserts`
pub fn nullable_store(inserts: &str) -> SqliteStore {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&SCHEMA.replace(" NOT NULL", "")).unwrap();
    conn.execute_batch(inserts).unwrap();
    SqliteStore::from_connection(conn)
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
