//! Labeled flight dataset CSV reader.
//!
//! Columns are located by header name so the reader tolerates extra columns
//! and arbitrary column order in the upstream dataset export.
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use csv::StringRecord;

use crate::flights::FlightRecord;

/// Read a labeled flights CSV into validated records.
///
/// Requires `OPERA`, `MES`, and `TIPOVUELO`; picks up `Fecha-I` / `Fecha-O`
/// when present so the rows can be used for label derivation.
pub fn read_flights_csv<P: AsRef<Path>>(path: P) -> Result<Vec<FlightRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open flights file: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read flights header row")?
        .clone();

    let opera_idx =
        find_column(&headers, "OPERA").ok_or_else(|| anyhow!("Missing column 'OPERA'"))?;
    let mes_idx = find_column(&headers, "MES").ok_or_else(|| anyhow!("Missing column 'MES'"))?;
    let tipo_idx = find_column(&headers, "TIPOVUELO")
        .ok_or_else(|| anyhow!("Missing column 'TIPOVUELO'"))?;
    let fecha_i_idx = find_column(&headers, "Fecha-I");
    let fecha_o_idx = find_column(&headers, "Fecha-O");

    let mut flights = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let month = field(&record, mes_idx, row_idx, "MES")?
            .parse::<i32>()
            .with_context(|| format!("Invalid MES at row {}", row_idx + 1))?;

        let flight = FlightRecord {
            airline: field(&record, opera_idx, row_idx, "OPERA")?.to_string(),
            month,
            flight_type: field(&record, tipo_idx, row_idx, "TIPOVUELO")?.to_string(),
            scheduled_departure: optional_field(&record, fecha_i_idx),
            actual_departure: optional_field(&record, fecha_o_idx),
        };
        flight
            .validate()
            .with_context(|| format!("Invalid flight at row {}", row_idx + 1))?;
        flights.push(flight);
    }

    if flights.is_empty() {
        bail!(
            "No flight rows found in {}",
            path.as_ref().display()
        );
    }
    Ok(flights)
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn field<'a>(record: &'a StringRecord, idx: usize, row: usize, name: &str) -> Result<&'a str> {
    record
        .get(idx)
        .ok_or_else(|| anyhow!("Missing {} value at row {}", name, row + 1))
}

fn optional_field(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
