//! Terminal rendering: record tables, dashboard figures, chart series

use crate::api::Resource;
use chrono::NaiveDate;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, ContentArrangement, Table,
};
use heliops_common::fleet::{FleetData, FleetStatistics, MonthlyHours, Series};
use heliops_common::models::{format_flight_hours, ExpiryStatus};

/// Width of the longest bar in a chart
const BAR_WIDTH: usize = 40;

/// Colors keyed on the stored dark-mode preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    fn accent(self) -> Color {
        if self.dark {
            Color::Cyan
        } else {
            Color::DarkBlue
        }
    }

    fn table(self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    fn header<I, S>(self, titles: I) -> Vec<Cell>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        titles
            .into_iter()
            .map(|t| Cell::new(t.into()).fg(self.accent()))
            .collect()
    }
}

fn expiry_color(status: ExpiryStatus) -> Option<Color> {
    match status {
        ExpiryStatus::Valid => None,
        ExpiryStatus::ExpiringSoon => Some(Color::Yellow),
        ExpiryStatus::Expired => Some(Color::Red),
    }
}

/// One row per record. Dated records get a status column, colored when
/// expired or expiring.
/// `directory` resolves referenced pilots, aircraft and clients to names
pub fn records_table<R: Resource>(
    records: &[&R],
    directory: &FleetData,
    theme: Theme,
    today: NaiveDate,
) -> Table {
    let dated = records.iter().any(|r| r.expiry(today).is_some());

    let mut headers: Vec<&str> = R::headers().to_vec();
    if dated {
        headers.push("Status");
    }

    let mut table = theme.table();
    table.set_header(theme.header(headers));

    for record in records {
        let status = record.expiry(today);
        let color = status.and_then(expiry_color);

        let mut cells: Vec<Cell> = record
            .row(directory)
            .into_iter()
            .map(|value| match color {
                Some(c) => Cell::new(value).fg(c),
                None => Cell::new(value),
            })
            .collect();

        if dated {
            let label = status.map(|s| s.to_string()).unwrap_or_default();
            cells.push(match color {
                Some(c) => Cell::new(label).fg(c),
                None => Cell::new(label),
            });
        }

        table.add_row(cells);
    }

    table
}

/// Field/value listing of a single record
pub fn record_detail<R: Resource>(record: &R, directory: &FleetData, theme: Theme) -> Table {
    let mut table = theme.table();
    for (field, value) in R::headers().iter().zip(record.row(directory)) {
        table.add_row(vec![Cell::new(*field).fg(theme.accent()), Cell::new(value)]);
    }
    table
}

pub fn statistics_table(stats: &FleetStatistics, theme: Theme) -> Table {
    let mut table = theme.table();
    table.set_header(theme.header(["Metric", "Value"]));

    let rows: [(&str, String); 12] = [
        ("Total flights", stats.total_flights.to_string()),
        ("Completed flights", stats.completed_flights.to_string()),
        ("Scheduled flights", stats.scheduled_flights.to_string()),
        ("Flight hours", format!("{:.2}", stats.total_hours)),
        ("Helicopters", stats.total_helicopters.to_string()),
        ("Active helicopters", stats.active_helicopters.to_string()),
        ("In maintenance", stats.helicopters_in_maintenance.to_string()),
        ("Pilots", stats.total_pilots.to_string()),
        ("Active clients", stats.active_clients.to_string()),
        ("Billing pending", stats.pending_billing.to_string()),
        ("Billing invoiced", stats.invoiced_pending_billing.to_string()),
        ("Billing paid", stats.paid_billing.to_string()),
    ];

    for (metric, value) in rows {
        table.add_row(vec![Cell::new(metric), Cell::new(value)]);
    }

    table
}

pub fn monthly_hours_table(summary: &MonthlyHours, pilot_name: &str, theme: Theme) -> Table {
    let mut table = theme.table();
    table.set_header(theme.header([
        format!("{} {:04}-{:02}", pilot_name, summary.year, summary.month),
        "Hours".to_string(),
    ]));

    for (tier, hours) in &summary.hours_by_tier {
        table.add_row(vec![Cell::new(tier.to_string()), Cell::new(format!("{:.2}", hours))]);
    }

    table.add_row(vec![
        Cell::new("Flights").fg(theme.accent()),
        Cell::new(summary.flights),
    ]);
    table.add_row(vec![
        Cell::new("Total hours").fg(theme.accent()),
        Cell::new(format!(
            "{:.2} ({})",
            summary.total_hours,
            format_flight_hours(summary.total_hours)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Amount").fg(theme.accent()),
        Cell::new(format!("{:.2}", summary.total_amount)),
    ]);

    table
}

/// Horizontal bar scaled against `max`
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * width as f64).round() as usize;
    "█".repeat(len.clamp(1, width))
}

pub fn series_table(series: &Series, theme: Theme) -> Table {
    let max = series.max();
    let total = series.total();

    let mut table = theme.table();
    table.set_header(theme.header([series.title.as_str(), "Value", "Share", ""]));

    for point in &series.points {
        let share = if total > 0.0 {
            format!("{:.0}%", point.value / total * 100.0)
        } else {
            "-".to_string()
        };

        table.add_row(vec![
            Cell::new(&point.label),
            Cell::new(format!("{:.2}", point.value)),
            Cell::new(share),
            Cell::new(bar(point.value, max, BAR_WIDTH)).fg(theme.accent()),
        ]);
    }

    table
}
