//! CSV export of derivation logs and JSON export of sizing results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::derivation::DerivationLog;
use crate::sizing::SizingResult;

/// Column header for the derivation CSV.
const HEADER: &str = "step,title,formula,substitution,result,unit";

/// Exports a derivation log to a CSV file at the given path.
///
/// Writes a header row followed by one row per step, in log order.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(log: &DerivationLog, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(log, buf)
}

/// Writes a derivation log as CSV to any writer.
///
/// Missing substitutions and units are written as empty fields.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(log: &DerivationLog, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;
    for step in log.steps() {
        wtr.write_record([
            step.number().as_str(),
            step.title.as_str(),
            step.formula.as_str(),
            step.substitution.as_deref().unwrap_or(""),
            step.result.as_str(),
            step.unit.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a sizing result as pretty-printed JSON.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(result: &SizingResult, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)
}
