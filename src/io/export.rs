//! CSV export for completed scheduling runs.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::dispatch::{ConsumptionReading, ScheduleEntry};

/// Schema v1 column header for CSV schedule export.
const HEADER: &str = "index,timestamp,consumption_kwh,charge_kw,discharge_kw,battery_level_kwh";

/// Exports a run to a CSV file at the given path.
///
/// Writes a header row followed by one data row per sample, zipping the
/// input readings with their schedule entries. Produces deterministic
/// output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(
    readings: &[ConsumptionReading],
    schedule: &[ScheduleEntry],
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(readings, schedule, buf)
}

/// Writes a run as CSV to any writer.
///
/// Rows are emitted for the zipped length of `readings` and `schedule`;
/// the engine guarantees the two are equal-length for any run it produced.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(
    readings: &[ConsumptionReading],
    schedule: &[ScheduleEntry],
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for (i, (r, e)) in readings.iter().zip(schedule.iter()).enumerate() {
        wtr.write_record(&[
            i.to_string(),
            r.timestamp.to_string(),
            format!("{:.4}", e.consumption_kwh),
            format!("{:.3}", e.charge_kw),
            format!("{:.3}", e.discharge_kw),
            format!("{:.3}", e.battery_level_kwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
