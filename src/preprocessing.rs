//! Feature encoding for the delay classifier.
//!
//! Every batch is projected onto a frozen, ordered indicator schema chosen at
//! model-authoring time. Training and inference must run the identical
//! transform or predictions are meaningless, so the schema is a compile-time
//! constant and never inferred from the live batch: categories outside the
//! schema are dropped, schema columns absent from the batch are zero-filled.
use chrono::NaiveDateTime;
use ndarray::Array2;

use crate::error::DelayError;
use crate::flights::FlightRecord;

/// Delay threshold in minutes. Strictly greater counts as delayed.
pub const DELAY_THRESHOLD_MINUTES: f32 = 15.0;

/// Timestamp layout of `Fecha-I` / `Fecha-O`.
const DEPARTURE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The frozen indicator schema, in training order. The booster is
/// positionally sensitive, so this order is part of the model contract.
pub const FEATURE_SCHEMA: [&str; 10] = [
    "OPERA_Latin American Wings",
    "MES_7",
    "MES_10",
    "OPERA_Grupo LATAM",
    "MES_12",
    "TIPOVUELO_I",
    "MES_4",
    "MES_11",
    "OPERA_Sky Airline",
    "OPERA_Copa Air",
];

/// Evaluate one schema column (`"<field>_<value>"`) against a record.
fn indicator(record: &FlightRecord, column: &str) -> f32 {
    let hit = if let Some(airline) = column.strip_prefix("OPERA_") {
        record.airline == airline
    } else if let Some(month) = column.strip_prefix("MES_") {
        month.parse::<i32>().map_or(false, |m| record.month == m)
    } else if let Some(flight_type) = column.strip_prefix("TIPOVUELO_") {
        record.flight_type == flight_type
    } else {
        false
    };
    if hit {
        1.0
    } else {
        0.0
    }
}

/// Encode a batch into the frozen feature layout.
///
/// Output always has exactly `FEATURE_SCHEMA.len()` columns in schema order,
/// one row per record, regardless of which categories appear in the batch.
/// Pure function of its input; validation happens at the caller boundary.
pub fn encode(records: &[FlightRecord]) -> Array2<f32> {
    let width = FEATURE_SCHEMA.len();
    let mut data = Vec::with_capacity(records.len() * width);
    for record in records {
        for column in FEATURE_SCHEMA {
            data.push(indicator(record, column));
        }
    }
    Array2::from_shape_vec((records.len(), width), data)
        .expect("encode: row-major buffer matches schema width")
}

/// Minute difference between actual and scheduled departure, exact to the
/// second (seconds / 60, not rounded).
pub fn departure_delay_minutes(record: &FlightRecord) -> Result<f32, DelayError> {
    let scheduled = parse_departure(record.scheduled_departure.as_deref(), "Fecha-I")?;
    let actual = parse_departure(record.actual_departure.as_deref(), "Fecha-O")?;
    Ok((actual - scheduled).num_seconds() as f32 / 60.0)
}

fn parse_departure(value: Option<&str>, field: &str) -> Result<NaiveDateTime, DelayError> {
    let value =
        value.ok_or_else(|| DelayError::Parse(format!("missing {} on training row", field)))?;
    NaiveDateTime::parse_from_str(value, DEPARTURE_FORMAT)
        .map_err(|e| DelayError::Parse(format!("{} '{}': {}", field, value, e)))
}

/// Derive 0/1 delay labels for a labeled training batch. Malformed
/// timestamps propagate; there is no silent defaulting.
pub fn derive_labels(records: &[FlightRecord]) -> Result<Vec<i32>, DelayError> {
    records
        .iter()
        .map(|record| {
            departure_delay_minutes(record)
                .map(|delta| if delta > DELAY_THRESHOLD_MINUTES { 1 } else { 0 })
        })
        .collect()
}

/// Training entry point: encode a labeled batch and derive its labels.
pub fn preprocess_training(
    records: &[FlightRecord],
) -> Result<(Array2<f32>, Vec<i32>), DelayError> {
    let labels = derive_labels(records)?;
    Ok((encode(records), labels))
}
