use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::field_coords::FieldCoordinates;
use crate::records::FlightRecord;

/// Grouping dimension for count breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    AircraftType,
    Field,
    LaunchMethod,
}

impl Dimension {
    fn value<'a>(&self, record: &'a FlightRecord) -> &'a str {
        match self {
            Dimension::AircraftType => &record.aircraft_type,
            Dimension::Field => &record.field,
            Dimension::LaunchMethod => &record.launch_method,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursEntry {
    pub label: String,
    pub hours: f64,
}

/// Most recent start of one aircraft type, with recency relative to the
/// reference date the caller supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastFlightEntry {
    pub aircraft_type: String,
    pub record: FlightRecord,
    pub days_since: i64,
}

/// Per-field start count joined with the coordinate table, for the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldGeoEntry {
    pub field: String,
    pub count: u64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Everything the dashboard renders, computed in one pass over the
/// filtered records. Recomputed fresh per interaction; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedViews {
    pub records: Vec<FlightRecord>,
    pub total_starts: u64,
    pub total_hours: f64,
    pub avg_duration_hours: Option<f64>,
    pub starts_by_type: Vec<CountEntry>,
    pub starts_by_field: Vec<CountEntry>,
    pub starts_by_method: Vec<CountEntry>,
    pub hours_by_type: Vec<HoursEntry>,
    pub last_flight_by_type: Vec<LastFlightEntry>,
    pub starts_by_field_geo: Vec<FieldGeoEntry>,
}

/// Group-by-count over one dimension.
///
/// Display order is descending count, ties broken by ascending label, so
/// repeated runs over the same input serialize identically.
pub fn counts_by(records: &[FlightRecord], dimension: Dimension) -> Vec<CountEntry> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for record in records {
        *counts.entry(dimension.value(record)).or_default() += 1;
    }
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry {
            label: label.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}

fn hours_by_type(records: &[FlightRecord]) -> Vec<HoursEntry> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in records {
        *totals.entry(record.aircraft_type.as_str()).or_default() += record.duration_hours;
    }
    let mut entries: Vec<HoursEntry> = totals
        .into_iter()
        .map(|(label, hours)| HoursEntry {
            label: label.to_string(),
            hours,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.hours
            .total_cmp(&a.hours)
            .then_with(|| a.label.cmp(&b.label))
    });
    entries
}

/// Per aircraft type, the record with the maximum date. When several
/// records share that date the first occurrence in input order wins.
fn last_flight_by_type(records: &[FlightRecord], today: NaiveDate) -> Vec<LastFlightEntry> {
    let mut latest: HashMap<&str, &FlightRecord> = HashMap::new();
    for record in records {
        latest
            .entry(record.aircraft_type.as_str())
            .and_modify(|current| {
                if record.date > current.date {
                    *current = record;
                }
            })
            .or_insert(record);
    }
    let mut entries: Vec<LastFlightEntry> = latest
        .into_values()
        .map(|record| LastFlightEntry {
            aircraft_type: record.aircraft_type.clone(),
            record: record.clone(),
            days_since: (today - record.date).num_days(),
        })
        .collect();
    entries.sort_by(|a, b| a.aircraft_type.cmp(&b.aircraft_type));
    entries
}

fn starts_by_field_geo(
    starts_by_field: &[CountEntry],
    coords: &FieldCoordinates,
) -> Vec<FieldGeoEntry> {
    // Unmapped fields are left off the map but keep their count elsewhere
    starts_by_field
        .iter()
        .filter_map(|entry| {
            coords.get(&entry.label).map(|(latitude, longitude)| FieldGeoEntry {
                field: entry.label.clone(),
                count: entry.count,
                latitude,
                longitude,
            })
        })
        .collect()
}

/// Compute all derived views from already-filtered records.
///
/// Pure function of its inputs: `today` is passed in rather than read from
/// the clock so identical inputs always produce identical output. Sums
/// accumulate in f64; rounding happens only at presentation time.
pub fn aggregate(
    records: Vec<FlightRecord>,
    coords: &FieldCoordinates,
    today: NaiveDate,
) -> DerivedViews {
    let total_starts = records.len() as u64;
    let total_hours: f64 = records.iter().map(|r| r.duration_hours).sum();
    let avg_duration_hours = (total_starts > 0).then(|| total_hours / total_starts as f64);

    let starts_by_type = counts_by(&records, Dimension::AircraftType);
    let starts_by_field = counts_by(&records, Dimension::Field);
    let starts_by_method = counts_by(&records, Dimension::LaunchMethod);
    let geo = starts_by_field_geo(&starts_by_field, coords);

    DerivedViews {
        total_starts,
        total_hours,
        avg_duration_hours,
        hours_by_type: hours_by_type(&records),
        last_flight_by_type: last_flight_by_type(&records, today),
        starts_by_type,
        starts_by_field,
        starts_by_method,
        starts_by_field_geo: geo,
        records,
    }
}
