//! Aircraft in the fleet

use serde::{Deserialize, Serialize};

/// Operational status of an aircraft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelicopterStatus {
    Active,
    Maintenance,
    Inactive,
}

impl std::fmt::Display for HelicopterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HelicopterStatus::Active => f.write_str("active"),
            HelicopterStatus::Maintenance => f.write_str("maintenance"),
            HelicopterStatus::Inactive => f.write_str("inactive"),
        }
    }
}

/// Hourly prices per rate tier, in the operator's billing currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRates {
    pub standard: f64,
    pub night: f64,
    pub weekend: f64,
    pub holiday: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Helicopter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub model: String,
    pub registration: String,
    pub manufacture_year: i32,
    pub status: HelicopterStatus,

    /// Cumulative airframe hours
    #[serde(default)]
    pub total_flight_hours: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rates: Option<HourlyRates>,
}

impl Helicopter {
    /// "Model (REG)" label used wherever an aircraft is referenced
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.model, self.registration)
    }
}
