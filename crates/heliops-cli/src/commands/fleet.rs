//! `heliops hours|stats|chart` command implementations
//!
//! All three run the fleet math over one [`FleetData`] snapshot, taken from
//! the built-in dataset with `--offline` or from the live API otherwise.

use crate::context::AppContext;
use crate::display;
use crate::error::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::ValueEnum;
use colored::Colorize;
use heliops_common::fleet::{
    pilot_monthly_hours, statistics, ChartKind, FixedHolidays, HolidayCalendar, NoHolidays,
};
use heliops_common::FleetData;

/// Dashboard chart selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartArg {
    /// Completed hours per month
    Hours,
    /// Completed flights per aircraft
    Helicopters,
    /// Flights per billing status
    Billing,
}

impl ChartArg {
    pub fn kind(self, year: i32) -> ChartKind {
        match self {
            ChartArg::Hours => ChartKind::HoursByMonth { year },
            ChartArg::Helicopters => ChartKind::FlightsByHelicopter,
            ChartArg::Billing => ChartKind::BillingBreakdown,
        }
    }
}

pub async fn hours(
    ctx: &AppContext,
    pilot: &str,
    year: i32,
    month: u32,
    holidays: Vec<NaiveDate>,
    offline: bool,
) -> Result<()> {
    let data = ctx.fleet_data(offline).await?;

    let calendar: Box<dyn HolidayCalendar> = if holidays.is_empty() {
        Box::new(NoHolidays)
    } else {
        Box::new(FixedHolidays::new(holidays))
    };

    let summary = pilot_monthly_hours(&data, pilot, year, month, calendar.as_ref())?;

    if summary.flights == 0 {
        println!(
            "No completed flights for {} in {:04}-{:02}.",
            data.pilot_name(pilot),
            year,
            month
        );
        return Ok(());
    }

    println!(
        "{}",
        display::monthly_hours_table(&summary, &data.pilot_name(pilot), ctx.theme())
    );
    Ok(())
}

pub async fn stats(ctx: &AppContext, offline: bool) -> Result<()> {
    let data = ctx.fleet_data(offline).await?;
    let stats = statistics(&data);

    println!("{}", "Fleet overview".cyan().bold());
    println!("{}", display::statistics_table(&stats, ctx.theme()));
    print_upcoming(&data);
    Ok(())
}

fn print_upcoming(data: &FleetData) {
    let mut scheduled: Vec<_> = data.flights.iter().filter(|f| !f.is_completed()).collect();
    if scheduled.is_empty() {
        return;
    }
    scheduled.sort_by(|a, b| (a.date, &a.departure_time).cmp(&(b.date, &b.departure_time)));

    println!();
    println!("{}", "Upcoming flights".cyan().bold());
    for flight in scheduled {
        println!(
            "  {} {}  {} -> {}  {}  {}",
            flight.date,
            flight.departure_time,
            data.location_name(&flight.origin_id),
            data.location_name(&flight.destination_id),
            data.helicopter_info(&flight.helicopter_id),
            data.pilot_name(&flight.pilot_id).dimmed()
        );
    }
}

pub async fn chart(ctx: &AppContext, chart: ChartArg, year: Option<i32>, offline: bool) -> Result<()> {
    let data = ctx.fleet_data(offline).await?;
    let year = year.unwrap_or_else(|| Local::now().year());

    let series = data.series(chart.kind(year));
    println!("{}", display::series_table(&series, ctx.theme()));
    println!("Total: {:.2}", series.total());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_arg_kind() {
        assert_eq!(ChartArg::Hours.kind(2024), ChartKind::HoursByMonth { year: 2024 });
        assert_eq!(ChartArg::Billing.kind(2024), ChartKind::BillingBreakdown);
        assert_eq!(ChartArg::from_str("helicopters", true).unwrap(), ChartArg::Helicopters);
    }
}
