mod common;

use airline_analyzer::{
    error::AppResult,
    metrics::{
        Measure, MetricOptions, NoData, compute_metrics, large_aircraft, occupancy_rates,
        project_uplift, revenue_per_ticket
    },
    store::{
        AverageFare, BookedSeats, BookingStore, DailyAmount, DailyCount, RevenueTotals, SeatCount
    }
};
use common::{approx_eq, fixture_store};
use proptest::prelude::*;

fn seat(code: &str, num_seats: i64) -> SeatCount {
    SeatCount {
        aircraft_code: Some(code.into()),
        num_seats
    }
}

fn booked(code: &str, flights: i64, booked_seats: f64) -> BookedSeats {
    BookedSeats {
        aircraft_code: Some(code.into()),
        flights,
        booked_seats
    }
}

fn totals(code: &str, ticket_count: i64, total_revenue: f64) -> RevenueTotals {
    RevenueTotals {
        aircraft_code: Some(code.into()),
        ticket_count,
        total_revenue
    }
}

/// In-memory store returning fixed rows, with a seat map deliberately out
/// of order relative to the other queries.
struct FixedStore;

impl BookingStore for FixedStore {
    fn seats_per_aircraft(&self) -> AppResult<Vec<SeatCount>> {
        Ok(vec![seat("Z", 200), seat("A", 100)])
    }

    fn tickets_by_date(&self) -> AppResult<Vec<DailyCount>> {
        Ok(Vec::new())
    }

    fn revenue_by_date(&self) -> AppResult<Vec<DailyAmount>> {
        Ok(Vec::new())
    }

    fn average_fares(&self) -> AppResult<Vec<AverageFare>> {
        Ok(Vec::new())
    }

    fn revenue_by_aircraft(&self) -> AppResult<Vec<RevenueTotals>> {
        Ok(vec![totals("Z", 10, 5000.0), totals("A", 4, 1000.0)])
    }

    fn booked_seats_by_aircraft(&self) -> AppResult<Vec<BookedSeats>> {
        Ok(vec![booked("A", 3, 50.0), booked("Z", 5, 150.0)])
    }
}

#[test]
fn test_fixture_metrics_end_to_end() {
    let (_dir, store) = fixture_store();
    let report = compute_metrics(&store, &MetricOptions::default()).unwrap();

    assert_eq!(report.seats_per_aircraft.len(), 2);
    assert!(report.large_aircraft.aircraft.is_empty());
    assert_eq!(report.large_aircraft.threshold, 100);

    let a = &report.revenue_per_aircraft[0];
    assert_eq!(a.aircraft_code.as_deref(), Some("A"));
    assert!(approx_eq(a.avg_revenue_per_ticket.value().unwrap(), 200.0));
    let b = &report.revenue_per_aircraft[1];
    assert!(approx_eq(b.avg_revenue_per_ticket.value().unwrap(), 150.0));

    assert!(approx_eq(report.occupancy[0].occupancy_rate.value().unwrap(), 0.5));
    assert!(approx_eq(
        report.occupancy[1].occupancy_rate.value().unwrap(),
        2.0 / 3.0
    ));

    let uplift = &report.uplift;
    assert!(approx_eq(uplift.rate, 0.10));
    let pa = uplift.rows[0].projection.value().unwrap();
    assert!(approx_eq(pa.increased_occupancy, 0.55));
    assert!(approx_eq(pa.increased_turnover, 440.0));
    assert!(approx_eq(pa.turnover_gain, 40.0));
    let pb = uplift.rows[1].projection.value().unwrap();
    assert!(approx_eq(pb.increased_occupancy, 2.0 / 3.0 * 1.1));
    assert!(approx_eq(pb.increased_turnover, 330.0));
    assert!(approx_eq(uplift.current_turnover, 700.0));
    assert!(approx_eq(uplift.projected_turnover, 770.0));
    assert!(approx_eq(uplift.turnover_gain, 70.0));
}

#[test]
fn test_fixture_daily_series_sum_to_totals() {
    let (_dir, store) = fixture_store();
    let report = compute_metrics(&store, &MetricOptions::default()).unwrap();

    let tickets: i64 = report.tickets_by_date.iter().map(|d| d.tickets).sum();
    assert_eq!(tickets, 4);
    let revenue: f64 = report.revenue_by_date.iter().map(|d| d.total_amount).sum();
    assert!(approx_eq(revenue, 450.0));
    assert!(
        report
            .tickets_by_date
            .windows(2)
            .all(|w| w[0].date < w[1].date)
    );
}

#[test]
fn test_fixture_revenue_sums_to_ticket_flights() {
    let (_dir, store) = fixture_store();
    let report = compute_metrics(&store, &MetricOptions::default()).unwrap();
    let total: f64 = report
        .revenue_per_aircraft
        .iter()
        .map(|r| r.total_revenue)
        .sum();
    assert!(approx_eq(total, 700.0));
}

#[test]
fn test_custom_uplift_rate() {
    let (_dir, store) = fixture_store();
    let opts = MetricOptions {
        uplift_rate:          0.5,
        large_aircraft_seats: 2
    };
    let report = compute_metrics(&store, &opts).unwrap();
    assert_eq!(report.large_aircraft.aircraft, vec!["B"]);
    assert!(approx_eq(report.uplift.projected_turnover, 1050.0));
}

#[test]
fn test_zero_uplift_keeps_turnover() {
    let (_dir, store) = fixture_store();
    let opts = MetricOptions {
        uplift_rate: 0.0,
        ..MetricOptions::default()
    };
    let report = compute_metrics(&store, &opts).unwrap();
    assert!(approx_eq(report.uplift.turnover_gain, 0.0));
}

#[test]
fn test_join_by_code_not_position() {
    let report = compute_metrics(&FixedStore, &MetricOptions::default()).unwrap();

    let a = &report.occupancy[0];
    assert_eq!(a.aircraft_code.as_deref(), Some("A"));
    assert_eq!(a.num_seats, 100);
    assert!(approx_eq(a.occupancy_rate.value().unwrap(), 0.5));

    let z = &report.occupancy[1];
    assert_eq!(z.num_seats, 200);
    assert!(approx_eq(z.occupancy_rate.value().unwrap(), 0.75));

    let row_a = &report.uplift.rows[0];
    assert_eq!(row_a.total_revenue, Measure::Value(1000.0));
    assert!(approx_eq(
        row_a.projection.value().unwrap().increased_turnover,
        1100.0
    ));
    let row_z = &report.uplift.rows[1];
    assert_eq!(row_z.total_revenue, Measure::Value(5000.0));
    assert_eq!(report.large_aircraft.aircraft, vec!["Z"]);
}

#[test]
fn test_large_aircraft_threshold_is_strict() {
    let seats = vec![seat("A", 100), seat("B", 101)];
    assert_eq!(large_aircraft(&seats, 100).aircraft, vec!["B"]);
}

#[test]
fn test_revenue_per_ticket_zero_tickets() {
    let rows = revenue_per_ticket(&[totals("A", 0, 0.0)]);
    assert_eq!(
        rows[0].avg_revenue_per_ticket,
        Measure::NoData(NoData::NoTickets)
    );
}

#[test]
fn test_revenue_per_ticket_is_fractional() {
    let rows = revenue_per_ticket(&[totals("A", 3, 100.0)]);
    assert!(approx_eq(
        rows[0].avg_revenue_per_ticket.value().unwrap(),
        100.0 / 3.0
    ));
}

#[test]
fn test_occupancy_zero_seats() {
    let rows = occupancy_rates(&[booked("A", 1, 5.0)], &[seat("A", 0)]);
    assert_eq!(rows[0].occupancy_rate, Measure::NoData(NoData::ZeroSeats));
}

#[test]
fn test_occupancy_missing_seat_map() {
    let rows = occupancy_rates(&[booked("X", 1, 5.0)], &[seat("A", 10)]);
    assert_eq!(rows[0].num_seats, 0);
    assert_eq!(
        rows[0].occupancy_rate,
        Measure::NoData(NoData::MissingSeatMap)
    );
}

#[test]
fn test_occupancy_skips_aircraft_that_never_flew() {
    let rows = occupancy_rates(&[booked("A", 1, 5.0)], &[seat("A", 10), seat("B", 20)]);
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_uplift_missing_revenue_excluded_from_totals() {
    let occupancy = occupancy_rates(
        &[booked("A", 1, 5.0), booked("B", 1, 5.0)],
        &[seat("A", 10), seat("B", 10)]
    );
    let revenue = revenue_per_ticket(&[totals("A", 1, 100.0)]);
    let report = project_uplift(&occupancy, &revenue, 0.1);
    assert_eq!(
        report.rows[1].projection,
        Measure::NoData(NoData::MissingRevenue)
    );
    assert!(approx_eq(report.current_turnover, 100.0));
    assert!(approx_eq(report.projected_turnover, 110.0));
}

#[test]
fn test_uplift_zero_occupancy() {
    let occupancy = occupancy_rates(&[booked("A", 1, 0.0)], &[seat("A", 10)]);
    let revenue = revenue_per_ticket(&[totals("A", 1, 100.0)]);
    let report = project_uplift(&occupancy, &revenue, 0.1);
    assert_eq!(
        report.rows[0].projection,
        Measure::NoData(NoData::ZeroOccupancy)
    );
    assert!(approx_eq(report.turnover_gain, 0.0));
}

#[test]
fn test_uplift_propagates_occupancy_reason() {
    let occupancy = occupancy_rates(&[booked("X", 1, 3.0)], &[]);
    let revenue = revenue_per_ticket(&[totals("X", 1, 100.0)]);
    let report = project_uplift(&occupancy, &revenue, 0.1);
    assert_eq!(
        report.rows[0].projection,
        Measure::NoData(NoData::MissingSeatMap)
    );
}

#[test]
fn test_null_aircraft_code_never_joins() {
    let store = common::nullable_store(
        "INSERT INTO seats VALUES (NULL, '1A', 'Economy'), (NULL, '1B', 'Economy');
         INSERT INTO flights (flight_id, aircraft_code) VALUES (1, NULL);
         INSERT INTO ticket_flights VALUES ('T1', 1, NULL, 80);
         INSERT INTO boarding_passes VALUES ('T1', 1, 1, '1A');"
    );
    let opts = MetricOptions {
        large_aircraft_seats: 1,
        ..MetricOptions::default()
    };
    let report = compute_metrics(&store, &opts).unwrap();

    assert_eq!(report.seats_per_aircraft[0].num_seats, 2);
    assert!(report.large_aircraft.aircraft.is_empty());
    assert_eq!(report.average_fares[0].fare_conditions, None);
    assert_eq!(report.occupancy[0].aircraft_code, None);
    assert_eq!(report.occupancy[0].num_seats, 0);
    assert_eq!(
        report.occupancy[0].occupancy_rate,
        Measure::NoData(NoData::MissingSeatMap)
    );
    assert_eq!(
        report.uplift.rows[0].projection,
        Measure::NoData(NoData::MissingSeatMap)
    );
    assert_eq!(
        report.uplift.rows[0].total_revenue,
        Measure::NoData(NoData::MissingRevenue)
    );
    assert!(approx_eq(report.uplift.current_turnover, 0.0));
}

proptest! {
    #[test]
    fn prop_uplift_preserves_revenue_per_occupancy(
        booked_seats in 1.0f64..500.0,
        num_seats in 1i64..600,
        revenue in 1.0f64..1e7,
        rate in 0.0f64..1.0
    ) {
        let occupancy = occupancy_rates(&[booked("A", 1, booked_seats)], &[seat("A", num_seats)]);
        let revenues = revenue_per_ticket(&[totals("A", 1, revenue)]);
        let report = project_uplift(&occupancy, &revenues, rate);
        let occ = occupancy[0].occupancy_rate.value().unwrap();
        prop_assert!(occ >= 0.0);
        if booked_seats <= num_seats as f64 {
            prop_assert!(occ <= 1.0);
        }
        let projection = report.rows[0].projection.value().unwrap();

        let before = revenue / occ;
        let after = projection.increased_turnover / projection.increased_occupancy;
        prop_assert!((before - after).abs() <= before.abs() * 1e-9);
        prop_assert!((projection.increased_occupancy - occ * (1.0 + rate)).abs() < 1e-9);
        prop_assert!(projection.turnover_gain >= -1e-6);
    }

    #[test]
    fn prop_fleet_gain_is_rate_times_current(
        revenues in proptest::collection::vec(1.0f64..1e6, 1..8),
        rate in 0.0f64..1.0
    ) {
        let codes: Vec<String> = (0..revenues.len()).map(|i| format!("C{}", i)).collect();
        let booked_rows: Vec<BookedSeats> = codes.iter().map(|c| booked(c, 1, 10.0)).collect();
        let seats: Vec<SeatCount> = codes.iter().map(|c| seat(c, 40)).collect();
        let totals_rows: Vec<RevenueTotals> = codes
            .iter()
            .zip(&revenues)
            .map(|(c, r)| totals(c, 1, *r))
            .collect();
        let occupancy = occupancy_rates(&booked_rows, &seats);
        let report = project_uplift(&occupancy, &revenue_per_ticket(&totals_rows), rate);
        let current: f64 = revenues.iter().sum();
        prop_assert!((report.current_turnover - current).abs() <= current * 1e-9);
        prop_assert!((report.turnover_gain - current * rate).abs() <= current * 1e-9);
    }
}
