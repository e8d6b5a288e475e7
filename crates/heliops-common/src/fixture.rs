//! Built-in demonstration dataset
//!
//! Used by `--offline` commands and by tests. Ids are internally consistent:
//! every flight references an existing pilot, aircraft, client and location.

use crate::fleet::FleetData;
use crate::models::{
    BillingStatus, Client, ClientType, Flight, FlightStatus, Helicopter, HelicopterStatus,
    HourlyRates, Location, User, UserRole,
};
use chrono::NaiveDate;

/// Fresh copy of the demonstration dataset
pub fn dataset() -> FleetData {
    FleetData {
        pilots: pilots(),
        helicopters: helicopters(),
        clients: clients(),
        locations: locations(),
        flights: flights(),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn pilot(id: &str, name: &str, license: &str, hours: f64, certs: &[&str]) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@heliops.example", id),
        role: UserRole::Pilot,
        license_number: Some(license.to_string()),
        flight_hours: Some(hours),
        certifications: certs.iter().map(|c| c.to_string()).collect(),
    }
}

fn pilots() -> Vec<User> {
    vec![
        pilot("p1", "Carlos Mendoza", "CPL-H 10482", 3250.5, &["AS350", "Bell 407", "NVG"]),
        pilot("p2", "Lucía Fernández", "ATPL-H 20931", 5120.0, &["AW119", "AS350", "IFR"]),
        pilot("p3", "Diego Rojas", "CPL-H 11877", 1480.3, &["R44", "AS350"]),
        pilot("p4", "Valentina Soto", "CPL-H 12004", 960.8, &["R44"]),
        User {
            id: "o1".to_string(),
            name: "Marta Ibáñez".to_string(),
            email: "o1@heliops.example".to_string(),
            role: UserRole::Operator,
            license_number: None,
            flight_hours: None,
            certifications: vec![],
        },
    ]
}

fn helicopter(
    id: &str,
    model: &str,
    registration: &str,
    year: i32,
    status: HelicopterStatus,
    hours: f64,
    rates: Option<HourlyRates>,
) -> Helicopter {
    Helicopter {
        id: id.to_string(),
        model: model.to_string(),
        registration: registration.to_string(),
        manufacture_year: year,
        status,
        total_flight_hours: hours,
        image_url: None,
        hourly_rates: rates,
    }
}

fn helicopters() -> Vec<Helicopter> {
    vec![
        helicopter(
            "h1",
            "Airbus H125",
            "CC-AHB",
            2015,
            HelicopterStatus::Active,
            6120.4,
            Some(HourlyRates {
                standard: 1650.0,
                night: 1980.0,
                weekend: 2150.0,
                holiday: 2480.0,
            }),
        ),
        helicopter("h2", "Bell 407GXi", "CC-BLX", 2019, HelicopterStatus::Active, 2890.7, None),
        helicopter(
            "h3",
            "Leonardo AW119 Kx",
            "CC-AWK",
            2017,
            HelicopterStatus::Maintenance,
            4410.0,
            Some(HourlyRates {
                standard: 2100.0,
                night: 2520.0,
                weekend: 2730.0,
                holiday: 3150.0,
            }),
        ),
        helicopter("h4", "Robinson R44 Raven II", "CC-RRV", 2011, HelicopterStatus::Inactive, 8035.9, None),
    ]
}

fn client(id: &str, name: &str, contact: &str, client_type: ClientType, active: bool) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        contact_name: Some(contact.to_string()),
        email: Some(format!("contacto@{}.example", id)),
        phone: Some("+56 2 2345 6789".to_string()),
        client_type,
        active,
    }
}

fn clients() -> Vec<Client> {
    vec![
        client("c1", "Minera Andes Norte", "Javier Pardo", ClientType::Corporate, true),
        client("c2", "Ministerio de Obras Públicas", "Ana Contreras", ClientType::Government, true),
        client("c3", "Roberto Vial", "Roberto Vial", ClientType::Individual, true),
        client("c4", "Forestal del Sur", "Paula Reyes", ClientType::Corporate, false),
    ]
}

fn locations() -> Vec<Location> {
    [
        ("l1", "Base Santiago (SCTB)"),
        ("l2", "Faena Los Bronces"),
        ("l3", "Valparaíso Helipuerto"),
        ("l4", "Concepción (SCIE)"),
        ("l5", "Portillo"),
    ]
    .into_iter()
    .map(|(id, name)| Location {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

struct Leg<'a> {
    id: &'a str,
    date: NaiveDate,
    pilot: &'a str,
    helicopter: &'a str,
    route: (&'a str, &'a str),
    times: (&'a str, &'a str),
    hours: &'a str,
    decimal: Option<f64>,
    status: FlightStatus,
    billing: BillingStatus,
    client: &'a str,
}

impl Leg<'_> {
    fn into_flight(self) -> Flight {
        let completed = self.status == FlightStatus::Completed;
        Flight {
            id: self.id.to_string(),
            date: self.date,
            pilot_id: self.pilot.to_string(),
            helicopter_id: self.helicopter.to_string(),
            origin_id: self.route.0.to_string(),
            destination_id: self.route.1.to_string(),
            departure_time: self.times.0.to_string(),
            arrival_time: self.times.1.to_string(),
            flight_hours: self.hours.to_string(),
            flight_time: self.decimal,
            status: self.status,
            billing_status: self.billing,
            starts: u32::from(completed),
            landings: if completed { 2 } else { 0 },
            launches: 0,
            odometer_start: None,
            odometer_end: None,
            client_id: self.client.to_string(),
        }
    }
}

fn flights() -> Vec<Flight> {
    use BillingStatus::{InvoicedPending, Paid, Pending};
    use FlightStatus::{Completed, Scheduled};

    #[rustfmt::skip]
    let legs = vec![
        Leg { id: "f1", date: date(2024, 1, 9), pilot: "p1", helicopter: "h1", route: ("l1", "l2"), times: ("08:30", "09:45"), hours: "1:15", decimal: Some(1.25), status: Completed, billing: Paid, client: "c1" },
        Leg { id: "f2", date: date(2024, 1, 13), pilot: "p1", helicopter: "h1", route: ("l2", "l1"), times: ("17:00", "18:20"), hours: "1:20", decimal: None, status: Completed, billing: Paid, client: "c1" },
        Leg { id: "f3", date: date(2024, 2, 6), pilot: "p2", helicopter: "h2", route: ("l1", "l3"), times: ("21:10", "22:00"), hours: "0:50", decimal: None, status: Completed, billing: InvoicedPending, client: "c2" },
        Leg { id: "f4", date: date(2024, 2, 20), pilot: "p2", helicopter: "h3", route: ("l1", "l4"), times: ("07:00", "09:30"), hours: "2:30", decimal: Some(2.5), status: Completed, billing: InvoicedPending, client: "c2" },
        Leg { id: "f5", date: date(2024, 3, 2), pilot: "p3", helicopter: "h2", route: ("l1", "l5"), times: ("10:00", "10:40"), hours: "0:40", decimal: None, status: Completed, billing: Pending, client: "c3" },
        Leg { id: "f6", date: date(2024, 3, 5), pilot: "p1", helicopter: "h1", route: ("l1", "l2"), times: ("05:30", "06:50"), hours: "1:20", decimal: None, status: Completed, billing: Pending, client: "c1" },
        Leg { id: "f7", date: date(2024, 3, 5), pilot: "p1", helicopter: "h1", route: ("l2", "l1"), times: ("14:00", "15:10"), hours: "1:10", decimal: None, status: Completed, billing: Pending, client: "c1" },
        Leg { id: "f8", date: date(2024, 3, 18), pilot: "p4", helicopter: "h2", route: ("l1", "l3"), times: ("12:00", "12:55"), hours: "0:55", decimal: None, status: Completed, billing: Pending, client: "c3" },
        Leg { id: "f9", date: date(2024, 4, 2), pilot: "p2", helicopter: "h1", route: ("l1", "l2"), times: ("09:00", "10:15"), hours: "1:15", decimal: None, status: Scheduled, billing: Pending, client: "c1" },
        Leg { id: "f10", date: date(2024, 4, 6), pilot: "p3", helicopter: "h2", route: ("l1", "l5"), times: ("20:30", "21:10"), hours: "0:40", decimal: None, status: Scheduled, billing: Pending, client: "c3" },
    ];

    legs.into_iter().map(Leg::into_flight).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::fleet::{pilot_monthly_hours, NoHolidays, UNKNOWN};

    #[test]
    fn test_fixture_foreign_keys_resolve() {
        let data = dataset();
        for flight in &data.flights {
            assert_ne!(data.pilot_name(&flight.pilot_id), UNKNOWN, "{}", flight.id);
            assert_ne!(data.client_name(&flight.client_id), UNKNOWN, "{}", flight.id);
            assert_ne!(data.helicopter_info(&flight.helicopter_id), UNKNOWN, "{}", flight.id);
            assert_ne!(data.location_name(&flight.destination_id), UNKNOWN, "{}", flight.id);
        }
    }

    #[test]
    fn test_fixture_dates_are_valid() {
        assert!(dataset().flights.iter().all(|f| f.date != NaiveDate::MIN));
    }

    #[test]
    fn test_pilot_march_report() {
        // f6 departs 05:30 on a Tuesday (night), f7 at 14:00 (standard), both on h1
        let data = dataset();
        let report = pilot_monthly_hours(&data, "p1", 2024, 3, &NoHolidays).unwrap();

        assert_eq!(report.flights, 2);
        assert_eq!(report.total_hours, 2.5);
        let expected = (80.0 / 60.0) * 1980.0 + (70.0 / 60.0) * 1650.0;
        assert!((report.total_amount - expected).abs() < 0.01);
    }
}
