//! Monthly hours reconciliation and rate-tier billing

use super::FleetData;
use crate::error::{HeliopsError, Result};
use crate::models::{Flight, HourlyRates};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Rates used when an aircraft carries no rate card of its own
pub const DEFAULT_RATES: HourlyRates = HourlyRates {
    standard: 1500.0,
    night: 1800.0,
    weekend: 1950.0,
    holiday: 2250.0,
};

/// Departures at or after this hour are billed as night flights
pub const NIGHT_START_HOUR: u32 = 20;
/// Departures before this hour are billed as night flights
pub const NIGHT_END_HOUR: u32 = 6;

/// Price bracket applied to a flight's hours.
///
/// Precedence when several apply: holiday > weekend > night > standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateTier {
    Standard,
    Night,
    Weekend,
    Holiday,
}

impl RateTier {
    pub fn rate(self, rates: &HourlyRates) -> f64 {
        match self {
            RateTier::Standard => rates.standard,
            RateTier::Night => rates.night,
            RateTier::Weekend => rates.weekend,
            RateTier::Holiday => rates.holiday,
        }
    }
}

impl std::fmt::Display for RateTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateTier::Standard => f.write_str("standard"),
            RateTier::Night => f.write_str("night"),
            RateTier::Weekend => f.write_str("weekend"),
            RateTier::Holiday => f.write_str("holiday"),
        }
    }
}

/// Source of public holidays for the holiday tier
pub trait HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Calendar with no holidays at all; the holiday tier never applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Explicit list of holiday dates
#[derive(Debug, Clone, Default)]
pub struct FixedHolidays(HashSet<NaiveDate>);

impl FixedHolidays {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self(dates.into_iter().collect())
    }
}

impl HolidayCalendar for FixedHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }
}

/// Pick the tier for a flight.
///
/// An unreadable departure time only loses the night tier; date-based tiers
/// still apply.
pub fn rate_tier(flight: &Flight, calendar: &dyn HolidayCalendar) -> RateTier {
    if calendar.is_holiday(flight.date) {
        return RateTier::Holiday;
    }

    if matches!(flight.date.weekday(), Weekday::Sat | Weekday::Sun) {
        return RateTier::Weekend;
    }

    match flight.departure_hour() {
        Ok(hour) if hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR => RateTier::Night,
        Ok(_) => RateTier::Standard,
        Err(e) => {
            warn!(flight_id = %flight.id, error = %e, "Unreadable departure time, billing as standard");
            RateTier::Standard
        },
    }
}

/// Hours and billing for one pilot over one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyHours {
    pub pilot_id: String,
    pub year: i32,
    pub month: u32,
    pub flights: usize,
    /// Decimal hours, two decimals
    pub total_hours: f64,
    /// Billed amount, two decimals
    pub total_amount: f64,
    /// Unrounded hours per tier, for the breakdown table
    pub hours_by_tier: BTreeMap<RateTier, f64>,
}

/// Sum completed flight time for a pilot in `year`/`month` and price it.
///
/// Flight time prefers the decimal `flight_time` field and falls back to the
/// "H:MM" string. A flight whose duration cannot be read counts as zero.
pub fn pilot_monthly_hours(
    data: &FleetData,
    pilot_id: &str,
    year: i32,
    month: u32,
    calendar: &dyn HolidayCalendar,
) -> Result<MonthlyHours> {
    if !(1..=12).contains(&month) {
        return Err(HeliopsError::InvalidMonth(month));
    }

    let mut total_hours = 0.0;
    let mut total_amount = 0.0;
    let mut flights = 0;
    let mut hours_by_tier = BTreeMap::new();

    for flight in data.flights_for_pilot(pilot_id).filter(|f| {
        f.is_completed() && f.date.year() == year && f.date.month() == month
    }) {
        let hours = match flight.duration_hours() {
            Ok(hours) => hours,
            Err(e) => {
                warn!(flight_id = %flight.id, error = %e, "Skipping unreadable flight duration");
                0.0
            },
        };

        let rates = data
            .helicopter(&flight.helicopter_id)
            .and_then(|h| h.hourly_rates)
            .unwrap_or(DEFAULT_RATES);
        let tier = rate_tier(flight, calendar);

        debug!(flight_id = %flight.id, hours, tier = %tier, "Billing flight");

        flights += 1;
        total_hours += hours;
        total_amount += hours * tier.rate(&rates);
        *hours_by_tier.entry(tier).or_insert(0.0) += hours;
    }

    Ok(MonthlyHours {
        pilot_id: pilot_id.to_string(),
        year,
        month,
        flights,
        total_hours: round2(total_hours),
        total_amount: round2(total_amount),
        hours_by_tier,
    })
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
