//! Users and their roles

use serde::{Deserialize, Serialize};

/// Role a user holds in the operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Pilot,
    Operator,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Pilot => f.write_str("pilot"),
            UserRole::Operator => f.write_str("operator"),
            UserRole::Admin => f.write_str("admin"),
        }
    }
}

/// An account known to the backend.
///
/// Pilots are users with `role == Pilot`; the role-specific fields are only
/// populated for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_hours: Option<f64>,

    #[serde(default)]
    pub certifications: Vec<String>,
}

impl User {
    pub fn is_pilot(&self) -> bool {
        self.role == UserRole::Pilot
    }
}
