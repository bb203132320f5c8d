use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, XlsxError};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::records::{FlightRecord, REQUIRED_COLUMNS, SkippedRow};

/// Result of a successful ingestion pass.
///
/// Malformed rows are dropped rather than failing the whole upload, but
/// every drop is recorded so the user sees how much of the file was usable.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub records: Vec<FlightRecord>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Error)]
pub enum IngestError {
    /// Fatal: the header row lacks one or more required columns.
    /// Nothing is ingested in this case.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("workbook contains no worksheets")]
    NoWorksheet,
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] XlsxError),
}

/// Parse an uploaded `.xlsx` export into flight records.
///
/// Reads the first worksheet. The header row must contain all of
/// [`REQUIRED_COLUMNS`]; extra columns are ignored. Rows with an
/// unparseable date, a non-positive or unparseable duration, or an empty
/// required cell are skipped and reported in the outcome.
///
/// Pure with respect to the caller: the input buffer is only read.
pub fn ingest_workbook(bytes: &[u8]) -> Result<IngestOutcome, IngestError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;

    let mut rows = range.rows();
    let header = rows.next().unwrap_or(&[]);
    let columns = locate_columns(header)?;

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (offset, row) in rows.enumerate() {
        // 1-based spreadsheet row number; +1 more for the header row
        let row_number = offset as u32 + 2;
        match parse_row(row, &columns) {
            Ok(record) => records.push(record),
            Err(reason) => {
                debug!("skipping row {}: {}", row_number, reason);
                skipped.push(SkippedRow {
                    row: row_number,
                    reason,
                });
            }
        }
    }

    if !skipped.is_empty() {
        warn!(
            "ingested {} records, skipped {} malformed rows",
            records.len(),
            skipped.len()
        );
    }

    Ok(IngestOutcome { records, skipped })
}

/// Indices of the six required columns within the header row.
struct ColumnIndices {
    date: usize,
    field: usize,
    aircraft_type: usize,
    registration: usize,
    launch_method: usize,
    duration: usize,
}

fn locate_columns(header: &[Data]) -> Result<ColumnIndices, IngestError> {
    let position = |name: &str| {
        header
            .iter()
            .position(|cell| matches!(cell, Data::String(s) if s.trim() == name))
    };

    let found: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|name| position(name)).collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .zip(&found)
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing));
    }

    Ok(ColumnIndices {
        date: found[0].unwrap(),
        field: found[1].unwrap(),
        aircraft_type: found[2].unwrap(),
        registration: found[3].unwrap(),
        launch_method: found[4].unwrap(),
        duration: found[5].unwrap(),
    })
}

fn parse_row(row: &[Data], columns: &ColumnIndices) -> Result<FlightRecord, String> {
    let cell = |idx: usize| row.get(idx).unwrap_or(&Data::Empty);

    let date = parse_date_cell(cell(columns.date)).ok_or("unparseable or empty Datum")?;
    let duration_hours =
        parse_duration_cell(cell(columns.duration)).ok_or("unparseable or non-positive Vluchtduur")?;
    let field = cell_string(cell(columns.field)).ok_or("empty Veld")?;
    let aircraft_type = cell_string(cell(columns.aircraft_type)).ok_or("empty Type")?;
    let registration = cell_string(cell(columns.registration)).ok_or("empty Registratie")?;
    let launch_method = cell_string(cell(columns.launch_method)).ok_or("empty Startmethode")?;

    Ok(FlightRecord {
        date,
        field,
        aircraft_type,
        registration,
        launch_method,
        duration_hours,
    })
}

fn cell_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

/// Dates arrive either as real Excel datetime cells or as text.
/// Text dates are day-first (`DD-MM-YYYY`), matching the source system,
/// with ISO `YYYY-MM-DD` accepted as well.
fn parse_date_cell(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime().map(|d| d.date()),
        Data::DateTimeIso(s) => parse_date_text(s),
        Data::String(s) => parse_date_text(s),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let date_part = text.split_whitespace().next()?;
    // ISO timestamps carry a 'T' separator instead of a space
    let date_part = date_part.split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d-%m-%Y"))
        .ok()
}

/// Normalize a duration cell to hours.
///
/// Conversion rule: Excel time cells are a fraction of a day (`* 24`);
/// bare numbers are minutes (`/ 60`). Clock text (`H:MM` or `H:MM:SS`)
/// and ISO durations are reduced to total minutes first and then divided
/// by 60 along the same path, so a value re-ingested from an export (which
/// writes minutes) lands on the identical f64. Anything non-positive is
/// rejected.
fn parse_duration_cell(cell: &Data) -> Option<f64> {
    let hours = match cell {
        Data::Float(f) => *f / 60.0,
        Data::Int(i) => *i as f64 / 60.0,
        Data::DateTime(dt) => dt.as_f64() * 24.0,
        Data::DurationIso(s) => parse_iso_duration(s)?,
        Data::String(s) => parse_clock_duration(s)?,
        _ => return None,
    };
    (hours > 0.0).then_some(hours)
}

fn parse_clock_duration(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return None;
    }
    let hours: f64 = parts[0].parse().ok()?;
    let minutes: f64 = parts[1].parse().ok()?;
    let seconds: f64 = if parts.len() == 3 {
        parts[2].parse().ok()?
    } else {
        0.0
    };
    let total_minutes = hours * 60.0 + minutes + seconds / 60.0;
    Some(total_minutes / 60.0)
}

/// Minimal ISO-8601 duration parser for `PT#H#M#S` values, which some
/// exports use for time-typed cells.
fn parse_iso_duration(text: &str) -> Option<f64> {
    let body = text.trim().strip_prefix("PT")?;
    let mut total_minutes = 0.0;
    let mut number = String::new();
    for ch in body.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            number.push(ch);
            continue;
        }
        let value: f64 = number.parse().ok()?;
        number.clear();
        match ch {
            'H' => total_minutes += value * 60.0,
            'M' => total_minutes += value,
            'S' => total_minutes += value / 60.0,
            _ => return None,
        }
    }
    if !number.is_empty() {
        return None;
    }
    Some(total_minutes / 60.0)
}
