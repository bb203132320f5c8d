//! End-to-end pipeline tests: filter + aggregate over a known record set,
//! including the worked example from the dashboard's acceptance notes.

use chrono::NaiveDate;
use startlog::aggregate::aggregate;
use startlog::field_coords::FieldCoordinates;
use startlog::filter::{FilterSpec, apply_filter};
use startlog::records::FlightRecord;

fn record(
    date: &str,
    field: &str,
    aircraft_type: &str,
    registration: &str,
    launch_method: &str,
    minutes: u32,
) -> FlightRecord {
    FlightRecord {
        date: date.parse().unwrap(),
        field: field.to_string(),
        aircraft_type: aircraft_type.to_string(),
        registration: registration.to_string(),
        launch_method: launch_method.to_string(),
        duration_hours: f64::from(minutes) / 60.0,
    }
}

fn sample() -> Vec<FlightRecord> {
    vec![
        record("2024-05-01", "FieldA", "Duster", "PH-1", "winch", 45),
        record("2024-05-01", "FieldA", "Duster", "PH-2", "aerotow", 30),
        record("2024-05-02", "FieldB", "Glider", "PH-3", "winch", 60),
    ]
}

fn coords() -> FieldCoordinates {
    FieldCoordinates::from_toml(
        r#"
        [fields]
        "FieldA" = { lat = 51.0, lon = 6.0 }
        "#,
    )
    .unwrap()
}

fn today() -> NaiveDate {
    "2024-05-10".parse().unwrap()
}

#[test]
fn field_filter_worked_example() {
    let records = sample();
    let spec = FilterSpec {
        fields: Some(vec!["FieldA".to_string()]),
        ..Default::default()
    };
    let filtered = apply_filter(&records, &spec);
    assert_eq!(filtered.len(), 2);

    let views = aggregate(filtered, &coords(), today());
    assert_eq!(views.total_starts, 2);
    assert!((views.total_hours - 1.25).abs() < 1e-12);

    // one winch, one aerotow; tie resolves alphabetically
    let methods: Vec<(&str, u64)> = views
        .starts_by_method
        .iter()
        .map(|c| (c.label.as_str(), c.count))
        .collect();
    assert_eq!(methods, vec![("aerotow", 1), ("winch", 1)]);

    // PH-1 and PH-2 share the max date; first occurrence wins
    assert_eq!(views.last_flight_by_type.len(), 1);
    assert_eq!(views.last_flight_by_type[0].aircraft_type, "Duster");
    assert_eq!(views.last_flight_by_type[0].record.registration, "PH-1");
}

#[test]
fn unset_filter_is_identity_and_counts_match() {
    let records = sample();
    let filtered = apply_filter(&records, &FilterSpec::default());
    assert_eq!(filtered, records);

    let views = aggregate(filtered, &coords(), today());
    assert_eq!(views.total_starts, records.len() as u64);
    assert_eq!(views.records, records);

    let type_sum: u64 = views.starts_by_type.iter().map(|c| c.count).sum();
    assert_eq!(type_sum, views.total_starts);
}

#[test]
fn total_hours_is_monotone_in_the_record_set() {
    let records = sample();
    let mut previous = 0.0;
    for n in 0..=records.len() {
        let views = aggregate(records[..n].to_vec(), &coords(), today());
        assert!(views.total_hours >= previous);
        previous = views.total_hours;
    }
}

#[test]
fn empty_filter_result_produces_empty_views() {
    let records = sample();
    let spec = FilterSpec {
        aircraft_types: Some(vec!["Nimbus".to_string()]),
        ..Default::default()
    };
    let filtered = apply_filter(&records, &spec);
    assert!(filtered.is_empty());

    let views = aggregate(filtered, &coords(), today());
    assert_eq!(views.total_starts, 0);
    assert_eq!(views.total_hours, 0.0);
    assert_eq!(views.avg_duration_hours, None);
    assert!(views.last_flight_by_type.is_empty());
}

#[test]
fn geo_view_only_contains_mapped_fields() {
    let views = aggregate(sample(), &coords(), today());
    assert_eq!(views.starts_by_field.len(), 2);
    assert_eq!(views.starts_by_field_geo.len(), 1);
    assert_eq!(views.starts_by_field_geo[0].field, "FieldA");
    assert_eq!(views.starts_by_field_geo[0].count, 2);
}

#[test]
fn repeated_aggregation_is_byte_identical() {
    let a = aggregate(sample(), &coords(), today());
    let b = aggregate(sample(), &coords(), today());
    assert_eq!(
        serde_json::to_vec(&a).unwrap(),
        serde_json::to_vec(&b).unwrap()
    );
}
