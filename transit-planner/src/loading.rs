//! Reading problem inputs from files.
//!
//! Station connection rows come as CSV with one row per hub: the hub in
//! the first field and its leaves in the remaining fields, so rows vary in
//! length. Everything else (crew, timeslots, track networks, roster
//! configuration) is JSON in the shapes the domain types deserialize from.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{DomainError, StationRow};

/// Errors that can occur when loading input files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed file with invalid content
    #[error("line {line}: {source}")]
    Domain { line: u64, source: DomainError },
}

fn reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All);

    builder
}

/// Parse station connection rows from CSV.
///
/// Empty fields are skipped, so trailing commas are harmless. Duplicate
/// rows are dropped and the result is sorted.
pub fn parse_station_rows(stream: impl Read) -> Result<Vec<StationRow>, LoadError> {
    let mut rows = BTreeSet::new();

    for record in reader().from_reader(stream).records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let names: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if names.is_empty() {
            continue;
        }
        let row = StationRow::parse(&names).map_err(|source| LoadError::Domain { line, source })?;
        rows.insert(row);
    }

    debug!(rows = rows.len(), "parsed station rows");
    Ok(rows.into_iter().collect())
}

/// Load station connection rows from a CSV file.
pub fn load_station_rows(path: impl AsRef<Path>) -> Result<Vec<StationRow>, LoadError> {
    let file = File::open(path)?;
    parse_station_rows(BufReader::new(file))
}

/// Load any JSON document the domain types know how to read.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, LoadError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
