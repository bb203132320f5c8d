use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::FlightRecord;

/// User-selected constraints for one dashboard interaction.
///
/// Every dimension is optional; an unset dimension places no constraint.
/// The spec is a plain value handed into the pipeline, never read from
/// ambient UI state, and never persisted between interactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub aircraft_types: Option<Vec<String>>,
    pub fields: Option<Vec<String>>,
    pub registrations: Option<Vec<String>>,
    pub launch_methods: Option<Vec<String>>,
    /// Inclusive lower bound.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub date_to: Option<NaiveDate>,
}

impl FilterSpec {
    pub fn matches(&self, record: &FlightRecord) -> bool {
        in_set(&self.aircraft_types, &record.aircraft_type)
            && in_set(&self.fields, &record.field)
            && in_set(&self.registrations, &record.registration)
            && in_set(&self.launch_methods, &record.launch_method)
            && self.date_from.is_none_or(|from| record.date >= from)
            && self.date_to.is_none_or(|to| record.date <= to)
    }
}

fn in_set(set: &Option<Vec<String>>, value: &str) -> bool {
    match set {
        Some(values) => values.iter().any(|v| v == value),
        None => true,
    }
}

/// Apply the filter, preserving input order. Stateless and deterministic;
/// an empty result is valid and every downstream aggregate handles it.
pub fn apply_filter(records: &[FlightRecord], spec: &FilterSpec) -> Vec<FlightRecord> {
    records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}

/// Distinct values per dimension for populating the filter widgets,
/// computed over the full (unfiltered) record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub aircraft_types: Vec<String>,
    pub fields: Vec<String>,
    pub registrations: Vec<String>,
    pub launch_methods: Vec<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

impl FilterOptions {
    pub fn from_records(records: &[FlightRecord]) -> Self {
        let distinct = |pick: fn(&FlightRecord) -> &str| {
            records
                .iter()
                .map(pick)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        };

        Self {
            aircraft_types: distinct(|r| r.aircraft_type.as_str()),
            fields: distinct(|r| r.field.as_str()),
            registrations: distinct(|r| r.registration.as_str()),
            launch_methods: distinct(|r| r.launch_method.as_str()),
            min_date: records.iter().map(|r| r.date).min(),
            max_date: records.iter().map(|r| r.date).max(),
        }
    }
}
