//! Fleet-wide lookups and aggregation
//!
//! Every helper works on a [`FleetData`] snapshot, regardless of whether it
//! came from the built-in fixture or from the live API.

pub mod billing;
pub mod stats;

pub use billing::{
    pilot_monthly_hours, rate_tier, FixedHolidays, HolidayCalendar, MonthlyHours, NoHolidays,
    RateTier, DEFAULT_RATES,
};
pub use stats::{statistics, ChartKind, FleetStatistics, Series, SeriesPoint};

use crate::models::{Client, Flight, Helicopter, Location, User};
use serde::{Deserialize, Serialize};

/// Placeholder shown when a referenced record does not exist
pub const UNKNOWN: &str = "Desconocido";

/// A consistent snapshot of the entities the math helpers need
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetData {
    pub pilots: Vec<User>,
    pub helicopters: Vec<Helicopter>,
    pub clients: Vec<Client>,
    #[serde(default)]
    pub locations: Vec<Location>,
    pub flights: Vec<Flight>,
}

impl FleetData {
    pub fn pilot(&self, id: &str) -> Option<&User> {
        self.pilots.iter().find(|p| p.id == id)
    }

    pub fn helicopter(&self, id: &str) -> Option<&Helicopter> {
        self.helicopters.iter().find(|h| h.id == id)
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn pilot_name(&self, id: &str) -> String {
        self.pilot(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn client_name(&self, id: &str) -> String {
        self.client(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// "Model (REG)" for the aircraft
    pub fn helicopter_info(&self, id: &str) -> String {
        self.helicopter(id)
            .map(Helicopter::display_label)
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn location_name(&self, id: &str) -> String {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Flights flown or scheduled by one pilot
    pub fn flights_for_pilot<'a>(&'a self, pilot_id: &'a str) -> impl Iterator<Item = &'a Flight> {
        self.flights.iter().filter(move |f| f.pilot_id == pilot_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn test_lookups_resolve_fixture_ids() {
        let data = fixture::dataset();
        let flight = &data.flights[0];

        assert_ne!(data.pilot_name(&flight.pilot_id), UNKNOWN);
        assert_ne!(data.client_name(&flight.client_id), UNKNOWN);
        assert!(data.helicopter_info(&flight.helicopter_id).contains('('));
        assert_ne!(data.location_name(&flight.origin_id), UNKNOWN);
    }

    #[test]
    fn test_lookups_fall_back_to_unknown() {
        let data = fixture::dataset();

        assert_eq!(data.pilot_name("no-such-pilot"), "Desconocido");
        assert_eq!(data.client_name("no-such-client"), "Desconocido");
        assert_eq!(data.helicopter_info("no-such-helicopter"), "Desconocido");
        assert_eq!(data.location_name(""), "Desconocido");
    }

    #[test]
    fn test_empty_snapshot_lookups() {
        let data = FleetData::default();
        assert_eq!(data.pilot_name("p1"), UNKNOWN);
        assert_eq!(data.flights_for_pilot("p1").count(), 0);
    }
}
