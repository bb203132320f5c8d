use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::aggregate::aggregate;
use crate::field_coords::FieldCoordinates;
use crate::ingest::ingest_workbook;

/// One-shot offline summary of a Startadministratie export, unfiltered.
/// Useful for a quick sanity check of a file before uploading it.
pub fn handle_summarize(file: PathBuf, fields: Option<PathBuf>) -> Result<()> {
    let coords = FieldCoordinates::load(fields.as_deref())?;
    let bytes = std::fs::read(&file)
        .with_context(|| format!("failed to read workbook {}", file.display()))?;
    let outcome = ingest_workbook(&bytes)?;

    let skipped = outcome.skipped.clone();
    let views = aggregate(outcome.records, &coords, Utc::now().date_naive());

    println!("Totaal starts: {}", views.total_starts);
    println!("Totaal uren:   {:.1}", views.total_hours);
    if let Some(avg) = views.avg_duration_hours {
        println!("Gem. duur:     {:.1} uur", avg);
    }

    println!();
    println!("Starts per type:");
    for entry in &views.starts_by_type {
        println!("  {:<20} {}", entry.label, entry.count);
    }

    println!();
    println!("Laatste vlucht per type:");
    for entry in &views.last_flight_by_type {
        println!(
            "  {:<20} {} ({} dagen geleden)",
            entry.aircraft_type,
            entry.record.date.format("%d-%m-%Y"),
            entry.days_since
        );
    }

    if !skipped.is_empty() {
        println!();
        println!("Overgeslagen rijen: {}", skipped.len());
        for row in &skipped {
            println!("  rij {}: {}", row.row, row.reason);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::export_workbook;
    use crate::records::FlightRecord;

    #[test]
    fn summarizes_a_workbook_on_disk() {
        let records = vec![FlightRecord {
            date: "2024-05-01".parse().unwrap(),
            field: "Venlo".to_string(),
            aircraft_type: "Duster".to_string(),
            registration: "PH-1".to_string(),
            launch_method: "winch".to_string(),
            duration_hours: 0.75,
        }];
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("start.xlsx");
        std::fs::write(&path, export_workbook(&records).unwrap()).unwrap();

        handle_summarize(path, None).unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bestaat-niet.xlsx");
        assert!(handle_summarize(path, None).is_err());
    }
}
