//! Raw flight records and field-level validation.
use serde::{Deserialize, Serialize};

use crate::error::DelayError;

pub const FLIGHT_TYPE_INTERNATIONAL: &str = "I";
pub const FLIGHT_TYPE_NATIONAL: &str = "N";

/// One row of scheduling metadata. Field names follow the upstream dataset
/// (`OPERA`, `MES`, `TIPOVUELO`); the departure timestamps are present on
/// training data only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Airline name, open vocabulary.
    #[serde(rename = "OPERA")]
    pub airline: String,
    /// Month of the scheduled departure, 1-12.
    #[serde(rename = "MES")]
    pub month: i32,
    /// "I" international or "N" national.
    #[serde(rename = "TIPOVUELO")]
    pub flight_type: String,
    /// Scheduled departure, `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "Fecha-I", default, skip_serializing_if = "Option::is_none")]
    pub scheduled_departure: Option<String>,
    /// Actual departure, `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "Fecha-O", default, skip_serializing_if = "Option::is_none")]
    pub actual_departure: Option<String>,
}

impl FlightRecord {
    pub fn new(airline: &str, month: i32, flight_type: &str) -> Self {
        FlightRecord {
            airline: airline.to_string(),
            month,
            flight_type: flight_type.to_string(),
            scheduled_departure: None,
            actual_departure: None,
        }
    }

    /// Attach departure timestamps, turning the record into a training row.
    pub fn with_departures(mut self, scheduled: &str, actual: &str) -> Self {
        self.scheduled_departure = Some(scheduled.to_string());
        self.actual_departure = Some(actual.to_string());
        self
    }

    /// Field-level validation. The serving boundary calls this before
    /// encoding; the CSV reader calls it per row at ingestion.
    pub fn validate(&self) -> Result<(), DelayError> {
        if !(1..=12).contains(&self.month) {
            return Err(DelayError::Validation(
                "MES must be between 1 and 12".to_string(),
            ));
        }
        if self.flight_type != FLIGHT_TYPE_INTERNATIONAL
            && self.flight_type != FLIGHT_TYPE_NATIONAL
        {
            return Err(DelayError::Validation(
                "TIPOVUELO must be either \"I\" or \"N\"".to_string(),
            ));
        }
        Ok(())
    }
}
