use crate::types::{FlatRecord, OutputFormat};

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the record type's fixed header row followed by one row per record.
pub fn write_csv<W: Write, T: FlatRecord + Serialize>(
    writer: W,
    records: &[T],
) -> Result<(), OutputError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(T::COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize>(mut writer: W, records: &[T]) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_records<T: FlatRecord + Serialize>(
    path: &Path,
    records: &[T],
    format: OutputFormat,
) -> Result<(), OutputError> {
    let file = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Csv => write_csv(file, records),
        OutputFormat::Json => write_json(file, records),
    }
}
