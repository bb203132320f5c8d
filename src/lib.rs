//! Startlog - flight-log dashboard backend for a gliding club.
//!
//! Members upload the club's Startadministratie spreadsheet export and
//! explore it: start counts, flight-hour totals, breakdowns per aircraft
//! type / field / launch method, last-flight recency, a per-field map
//! view, and a filtered re-export. The core is a pure ingest -> filter ->
//! aggregate pipeline; the web layer is a thin presentation boundary.

pub mod actions;
pub mod aggregate;
pub mod commands;
pub mod export;
pub mod field_coords;
pub mod filter;
pub mod ingest;
pub mod records;
pub mod web;

pub use aggregate::{DerivedViews, Dimension, aggregate};
pub use filter::{FilterOptions, FilterSpec, apply_filter};
pub use ingest::{IngestError, IngestOutcome, ingest_workbook};
pub use records::{Dataset, FlightRecord, REQUIRED_COLUMNS};
