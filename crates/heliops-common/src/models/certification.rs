//! Pilot qualifications, medical certificates and training records
//!
//! Every record here ties to a pilot id, has an issue date, an optional expiry
//! date, an issuing authority or instructor and an optional scanned document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days before expiry at which a record is flagged as expiring
pub const EXPIRY_WARNING_DAYS: i64 = 30;

/// Validity of a dated record relative to a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    Valid,
    ExpiringSoon,
    Expired,
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryStatus::Valid => f.write_str("valid"),
            ExpiryStatus::ExpiringSoon => f.write_str("expiring"),
            ExpiryStatus::Expired => f.write_str("expired"),
        }
    }
}

/// Classify an optional expiry date against `today`. No expiry means valid.
pub fn expiry_status(expiry: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
    match expiry {
        None => ExpiryStatus::Valid,
        Some(date) if date < today => ExpiryStatus::Expired,
        Some(date) if (date - today).num_days() <= EXPIRY_WARNING_DAYS => {
            ExpiryStatus::ExpiringSoon
        },
        Some(_) => ExpiryStatus::Valid,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualification {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub pilot_id: String,
    /// Type rating or endorsement, e.g. "AS350 B3 type rating"
    pub name: String,
    pub issue_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub issuing_authority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalCertificate {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub pilot_id: String,
    /// Medical class, e.g. "Class 1"
    pub class: String,
    pub issue_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub issuing_authority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingCourse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub pilot_id: String,
    pub course_name: String,
    pub issue_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub instructor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticalTraining {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub pilot_id: String,
    /// Exercise flown, e.g. "Autorotation to touchdown"
    pub exercise: String,
    pub issue_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub instructor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
}

/// Shared accessors over the four dated pilot records
pub trait PilotRecord {
    fn pilot_id(&self) -> &str;
    fn expiry_date(&self) -> Option<NaiveDate>;

    fn expiry_status(&self, today: NaiveDate) -> ExpiryStatus {
        expiry_status(self.expiry_date(), today)
    }
}

macro_rules! impl_pilot_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PilotRecord for $ty {
                fn pilot_id(&self) -> &str {
                    &self.pilot_id
                }

                fn expiry_date(&self) -> Option<NaiveDate> {
                    self.expiry_date
                }
            }
        )+
    };
}

impl_pilot_record!(Qualification, MedicalCertificate, TrainingCourse, PracticalTraining);

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_expiry_status() {
        let today = day("2026-03-01");
        assert_eq!(expiry_status(None, today), ExpiryStatus::Valid);
        assert_eq!(expiry_status(Some(day("2026-02-28")), today), ExpiryStatus::Expired);
        assert_eq!(expiry_status(Some(day("2026-03-01")), today), ExpiryStatus::ExpiringSoon);
        assert_eq!(expiry_status(Some(day("2026-03-31")), today), ExpiryStatus::ExpiringSoon);
        assert_eq!(expiry_status(Some(day("2026-04-01")), today), ExpiryStatus::Valid);
    }

    #[test]
    fn test_medical_certificate_record() {
        let cert: MedicalCertificate = serde_json::from_str(
            r#"{
                "id": "m1",
                "pilotId": "p1",
                "class": "Class 1",
                "issueDate": "2025-06-01",
                "expiryDate": "2026-06-01",
                "issuingAuthority": "DGAC"
            }"#,
        )
        .unwrap();

        assert_eq!(cert.pilot_id(), "p1");
        assert_eq!(cert.expiry_status(day("2026-07-01")), ExpiryStatus::Expired);
        assert!(cert.document_url.is_none());
    }
}
