//! Dashboard statistics and chart series

use super::billing::round2;
use super::FleetData;
use crate::models::{BillingStatus, FlightStatus, HelicopterStatus};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStatistics {
    pub total_flights: usize,
    pub completed_flights: usize,
    pub scheduled_flights: usize,
    /// Completed flight hours, two decimals
    pub total_hours: f64,
    pub total_helicopters: usize,
    pub active_helicopters: usize,
    pub helicopters_in_maintenance: usize,
    pub total_pilots: usize,
    pub active_clients: usize,
    pub pending_billing: usize,
    pub invoiced_pending_billing: usize,
    pub paid_billing: usize,
}

pub fn statistics(data: &FleetData) -> FleetStatistics {
    let count_flights = |status: FlightStatus| data.flights.iter().filter(|f| f.status == status).count();
    let count_billing =
        |status: BillingStatus| data.flights.iter().filter(|f| f.billing_status == status).count();
    let count_helicopters =
        |status: HelicopterStatus| data.helicopters.iter().filter(|h| h.status == status).count();

    let total_hours: f64 = data
        .flights
        .iter()
        .filter(|f| f.is_completed())
        .filter_map(|f| f.duration_hours().ok())
        .sum();

    FleetStatistics {
        total_flights: data.flights.len(),
        completed_flights: count_flights(FlightStatus::Completed),
        scheduled_flights: count_flights(FlightStatus::Scheduled),
        total_hours: round2(total_hours),
        total_helicopters: data.helicopters.len(),
        active_helicopters: count_helicopters(HelicopterStatus::Active),
        helicopters_in_maintenance: count_helicopters(HelicopterStatus::Maintenance),
        total_pilots: data.pilots.iter().filter(|p| p.is_pilot()).count(),
        active_clients: data.clients.iter().filter(|c| c.active).count(),
        pending_billing: count_billing(BillingStatus::Pending),
        invoiced_pending_billing: count_billing(BillingStatus::InvoicedPending),
        paid_billing: count_billing(BillingStatus::Paid),
    }
}

/// The three dashboard charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Line chart: completed hours per month of a year
    HoursByMonth { year: i32 },
    /// Bar chart: completed flights per aircraft
    FlightsByHelicopter,
    /// Doughnut chart: flights per billing status
    BillingBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// A labelled data series ready to hand to a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub title: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    pub fn max(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }
}

impl FleetData {
    pub fn series(&self, kind: ChartKind) -> Series {
        match kind {
            ChartKind::HoursByMonth { year } => hours_by_month(self, year),
            ChartKind::FlightsByHelicopter => flights_by_helicopter(self),
            ChartKind::BillingBreakdown => billing_breakdown(self),
        }
    }
}

fn hours_by_month(data: &FleetData, year: i32) -> Series {
    let mut months = [0.0_f64; 12];

    for flight in data
        .flights
        .iter()
        .filter(|f| f.is_completed() && f.date.year() == year)
    {
        if let Ok(hours) = flight.duration_hours() {
            months[flight.date.month0() as usize] += hours;
        }
    }

    Series {
        title: format!("Flight hours {}", year),
        points: months
            .iter()
            .enumerate()
            .map(|(i, hours)| SeriesPoint {
                label: format!("{:02}", i + 1),
                value: round2(*hours),
            })
            .collect(),
    }
}

fn flights_by_helicopter(data: &FleetData) -> Series {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for flight in data.flights.iter().filter(|f| f.is_completed()) {
        *counts.entry(data.helicopter_info(&flight.helicopter_id)).or_default() += 1;
    }

    Series {
        title: "Flights by helicopter".to_string(),
        points: counts
            .into_iter()
            .map(|(label, count)| SeriesPoint {
                label,
                value: count as f64,
            })
            .collect(),
    }
}

fn billing_breakdown(data: &FleetData) -> Series {
    let points = [
        BillingStatus::Pending,
        BillingStatus::InvoicedPending,
        BillingStatus::Paid,
    ]
    .into_iter()
    .map(|status| SeriesPoint {
        label: status.to_string(),
        value: data.flights.iter().filter(|f| f.billing_status == status).count() as f64,
    })
    .collect();

    Series {
        title: "Billing status".to_string(),
        points,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn test_statistics_counts_match_fixture() {
        let data = fixture::dataset();
        let stats = statistics(&data);

        assert_eq!(stats.total_flights, data.flights.len());
        assert_eq!(
            stats.completed_flights + stats.scheduled_flights,
            stats.total_flights
        );
        assert_eq!(
            stats.pending_billing + stats.invoiced_pending_billing + stats.paid_billing,
            stats.total_flights
        );
        assert!(stats.total_hours > 0.0);
    }

    #[test]
    fn test_statistics_on_empty_data() {
        let stats = statistics(&FleetData::default());
        assert_eq!(stats.total_flights, 0);
        assert_eq!(stats.total_hours, 0.0);
    }

    #[test]
    fn test_billing_breakdown_sums_to_total() {
        let data = fixture::dataset();
        let series = data.series(ChartKind::BillingBreakdown);

        assert_eq!(series.points.len(), 3);
        assert_eq!(series.total() as usize, data.flights.len());
    }

    #[test]
    fn test_hours_by_month_has_twelve_points() {
        let data = fixture::dataset();
        let series = data.series(ChartKind::HoursByMonth { year: 2024 });

        assert_eq!(series.points.len(), 12);
        assert_eq!(series.points[0].label, "01");
        assert!((series.total() - statistics(&data).total_hours).abs() < 0.05);
    }

    #[test]
    fn test_flights_by_helicopter_counts_completed_only() {
        let data = fixture::dataset();
        let series = data.series(ChartKind::FlightsByHelicopter);
        assert_eq!(series.total() as usize, statistics(&data).completed_flights);
    }
}
