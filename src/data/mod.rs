use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use thiserror::Error;

use crate::{ConstellationInput, GroundEndpoints, RelayRecord};

const RELAY_FIELDS: usize = 4;
const TRAILER_FIELDS: usize = 5;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: field {field} is not a number: {value:?}")]
    InvalidNumber {
        line: u64,
        field: usize,
        value: String,
    },
    #[error("line {line}: field {field} is not finite")]
    NonFinite { line: u64, field: usize },
    #[error("input has no route trailer record")]
    MissingTrailer,
}

/// Parses relay records followed by one trailer record.
///
/// Relay lines are `label,polar,azimuth,altitude`; the final line is
/// `_,start_polar,start_azimuth,stop_polar,stop_azimuth` with its first field
/// ignored. Lines starting with `#` are skipped.
pub fn parse_records<R: Read>(reader: R) -> Result<ConstellationInput, DataError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.records() {
        let record = row?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        records.push((line, record));
    }

    let (trailer_line, trailer) = records.pop().ok_or(DataError::MissingTrailer)?;
    let endpoints = parse_trailer(trailer_line, &trailer)?;

    let relays = records
        .iter()
        .map(|(line, record)| parse_relay(*line, record))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Parsed {} relay records", relays.len());
    Ok(ConstellationInput { relays, endpoints })
}

pub fn read_records_from_file<P: AsRef<Path>>(path: P) -> Result<ConstellationInput, DataError> {
    let file = File::open(path)?;
    parse_records(file)
}

fn parse_relay(line: u64, record: &StringRecord) -> Result<RelayRecord, DataError> {
    expect_fields(line, record, RELAY_FIELDS)?;
    Ok(RelayRecord {
        label: record[0].to_string(),
        polar: number(line, record, 1)?,
        azimuth: number(line, record, 2)?,
        altitude: number(line, record, 3)?,
    })
}

fn parse_trailer(line: u64, record: &StringRecord) -> Result<GroundEndpoints, DataError> {
    expect_fields(line, record, TRAILER_FIELDS)?;
    Ok(GroundEndpoints {
        start_polar: number(line, record, 1)?,
        start_azimuth: number(line, record, 2)?,
        stop_polar: number(line, record, 3)?,
        stop_azimuth: number(line, record, 4)?,
    })
}

fn expect_fields(line: u64, record: &StringRecord, expected: usize) -> Result<(), DataError> {
    if record.len() != expected {
        return Err(DataError::FieldCount {
            line,
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

fn number(line: u64, record: &StringRecord, field: usize) -> Result<f64, DataError> {
    let raw = &record[field];
    let value: f64 = raw.parse().map_err(|_| DataError::InvalidNumber {
        line,
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(DataError::NonFinite { line, field });
    }
    Ok(value)
}
