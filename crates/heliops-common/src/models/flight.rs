//! Flight log entries

use crate::error::{HeliopsError, Result};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    Completed,
    Scheduled,
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlightStatus::Completed => f.write_str("completed"),
            FlightStatus::Scheduled => f.write_str("scheduled"),
        }
    }
}

/// Invoicing progress of a flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    Pending,
    InvoicedPending,
    Paid,
}

impl std::fmt::Display for BillingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillingStatus::Pending => f.write_str("pending"),
            BillingStatus::InvoicedPending => f.write_str("invoiced_pending"),
            BillingStatus::Paid => f.write_str("paid"),
        }
    }
}

/// One leg flown (or to be flown) by a pilot on an aircraft.
///
/// Duration is carried twice: `flight_hours` as "H:MM" and the optional
/// decimal `flight_time`. The two are not kept consistent by anyone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub date: NaiveDate,
    pub pilot_id: String,
    pub helicopter_id: String,
    pub origin_id: String,
    pub destination_id: String,

    /// "HH:MM", local time
    pub departure_time: String,
    pub arrival_time: String,

    pub flight_hours: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_time: Option<f64>,

    pub status: FlightStatus,
    pub billing_status: BillingStatus,

    #[serde(default)]
    pub starts: u32,
    #[serde(default)]
    pub landings: u32,
    #[serde(default)]
    pub launches: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer_end: Option<f64>,

    pub client_id: String,
}

impl Flight {
    /// Decimal duration, preferring `flight_time` over parsing `flight_hours`
    pub fn duration_hours(&self) -> Result<f64> {
        match self.flight_time {
            Some(hours) => Ok(hours),
            None => parse_flight_hours(&self.flight_hours),
        }
    }

    /// Hour of day (0-23) of the departure
    pub fn departure_hour(&self) -> Result<u32> {
        Ok(parse_clock_time(&self.departure_time)?.hour())
    }

    pub fn is_completed(&self) -> bool {
        self.status == FlightStatus::Completed
    }
}

/// Parse an "H:MM" duration into decimal hours
pub fn parse_flight_hours(value: &str) -> Result<f64> {
    let invalid = || HeliopsError::InvalidFlightTime(value.to_string());

    let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    if minutes >= 60 {
        return Err(invalid());
    }

    Ok(f64::from(hours) + f64::from(minutes) / 60.0)
}

/// Format decimal hours as "H:MM"
pub fn format_flight_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round().max(0.0) as u64;
    format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Parse an "HH:MM" wall-clock time
pub fn parse_clock_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| HeliopsError::InvalidClockTime(value.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flight_hours() {
        assert_eq!(parse_flight_hours("1:30").unwrap(), 1.5);
        assert_eq!(parse_flight_hours("0:45").unwrap(), 0.75);
        assert_eq!(parse_flight_hours("12:00").unwrap(), 12.0);
    }

    #[test]
    fn test_parse_flight_hours_rejects_garbage() {
        assert!(parse_flight_hours("1.5").is_err());
        assert!(parse_flight_hours("1:75").is_err());
        assert!(parse_flight_hours("").is_err());
    }

    #[test]
    fn test_format_flight_hours() {
        assert_eq!(format_flight_hours(1.5), "1:30");
        assert_eq!(format_flight_hours(0.25), "0:15");
        assert_eq!(format_flight_hours(10.0), "10:00");
    }

    #[test]
    fn test_billing_status_wire_format() {
        let status: BillingStatus = serde_json::from_str("\"invoiced_pending\"").unwrap();
        assert_eq!(status, BillingStatus::InvoicedPending);
        assert_eq!(status.to_string(), "invoiced_pending");
    }

    #[test]
    fn test_departure_hour() {
        assert_eq!(parse_clock_time("21:00").unwrap().hour(), 21);
        assert!(parse_clock_time("25:00").is_err());
    }
}
