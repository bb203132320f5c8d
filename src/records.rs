use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ingest::IngestOutcome;

/// Column schema of the Startadministratie export. Names are case-sensitive
/// and must match the source system exactly; extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Datum",
    "Veld",
    "Type",
    "Registratie",
    "Startmethode",
    "Vluchtduur",
];

/// One start: a single launch/flight event from the club log.
///
/// Durations are normalized to hours at the ingestion boundary so every
/// aggregate downstream works in a single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub date: NaiveDate,
    pub field: String,
    pub aircraft_type: String,
    pub registration: String,
    pub launch_method: String,
    pub duration_hours: f64,
}

/// A row dropped during ingestion, with a human-readable reason.
/// Row numbers are 1-based as shown in the spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row: u32,
    pub reason: String,
}

/// The record set from the most recent successful upload.
/// Replaced wholesale on the next upload; no merge/append semantics.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<FlightRecord>,
    pub skipped: Vec<SkippedRow>,
    pub uploaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn from_outcome(outcome: IngestOutcome) -> Self {
        Self {
            records: outcome.records,
            skipped: outcome.skipped,
            uploaded_at: Utc::now(),
        }
    }
}
