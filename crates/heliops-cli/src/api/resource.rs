//! One CRUD abstraction for every backend entity
//!
//! Each entity names its collection path and how it is searched, filtered
//! and tabulated. [`ApiClient`](super::ApiClient) and
//! [`ListScreen`](crate::screen::ListScreen) are generic over this trait, so
//! adding an entity means adding one impl here.

use chrono::NaiveDate;
use heliops_common::FleetData;
use heliops_common::models::{
    Client, ExpiryStatus, Flight, GroundSupport, Helicopter, LibraryDocument, MedicalCertificate,
    PilotRecord, PracticalTraining, Qualification, TrainingCourse, User,
};
use serde::{de::DeserializeOwned, Serialize};

pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path relative to the API base, with leading slash
    const PATH: &'static str;

    /// Singular human name, used in prompts and logs
    const LABEL: &'static str;

    /// Rows refer to pilots, aircraft or clients by id; listing fetches
    /// those collections too so names can be shown and searched
    const NEEDS_DIRECTORY: bool = false;

    fn id(&self) -> &str;

    /// Text the free-form search box matches against
    fn search_text(&self, directory: &FleetData) -> String;

    /// Value the status/category dropdown filters on
    fn category(&self) -> Option<String> {
        None
    }

    fn headers() -> &'static [&'static str];

    fn row(&self, directory: &FleetData) -> Vec<String>;

    /// Pilot the record belongs to, for `--pilot` filtering
    fn owner_pilot_id(&self) -> Option<&str> {
        None
    }

    /// URL currently in the attachment slot
    fn attachment(&self) -> Option<&str> {
        None
    }

    /// Store an uploaded file's URL on the record. Returns false when the
    /// entity has no attachment slot.
    fn attach(&mut self, _url: String) -> bool {
        false
    }

    /// Validity of dated records, used to highlight rows
    fn expiry(&self, _today: NaiveDate) -> Option<ExpiryStatus> {
        None
    }
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_date(value: Option<NaiveDate>) -> String {
    value.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

impl Resource for User {
    const PATH: &'static str = "/pilots";
    const LABEL: &'static str = "pilot";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self, _directory: &FleetData) -> String {
        format!("{} {} {}", self.name, self.email, opt(&self.license_number))
    }

    fn category(&self) -> Option<String> {
        Some(self.role.to_string())
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Email", "License", "Hours"]
    }

    fn row(&self, _directory: &FleetData) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            opt(&self.license_number),
            self.flight_hours.map(|h| format!("{:.1}", h)).unwrap_or_default(),
        ]
    }
}

impl Resource for Helicopter {
    const PATH: &'static str = "/helicopters";
    const LABEL: &'static str = "helicopter";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self, _directory: &FleetData) -> String {
        format!("{} {}", self.model, self.registration)
    }

    fn category(&self) -> Option<String> {
        Some(self.status.to_string())
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Model", "Registration", "Year", "Status", "Hours"]
    }

    fn row(&self, _directory: &FleetData) -> Vec<String> {
        vec![
            self.id.clone(),
            self.model.clone(),
            self.registration.clone(),
            self.manufacture_year.to_string(),
            self.status.to_string(),
            format!("{:.1}", self.total_flight_hours),
        ]
    }

    fn attachment(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn attach(&mut self, url: String) -> bool {
        self.image_url = Some(url);
        true
    }
}

impl Resource for Flight {
    const PATH: &'static str = "/flights";
    const LABEL: &'static str = "flight";
    const NEEDS_DIRECTORY: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self, directory: &FleetData) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.id,
            self.date,
            directory.pilot_name(&self.pilot_id),
            directory.helicopter_info(&self.helicopter_id),
            directory.client_name(&self.client_id),
            self.billing_status
        )
    }

    fn category(&self) -> Option<String> {
        Some(self.status.to_string())
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Date", "Pilot", "Helicopter", "Client", "Dep", "Arr", "Time", "Status", "Billing"]
    }

    fn row(&self, directory: &FleetData) -> Vec<String> {
        vec![
            self.id.clone(),
            self.date.to_string(),
            directory.pilot_name(&self.pilot_id),
            directory.helicopter_info(&self.helicopter_id),
            directory.client_name(&self.client_id),
            self.departure_time.clone(),
            self.arrival_time.clone(),
            self.flight_hours.clone(),
            self.status.to_string(),
            self.billing_status.to_string(),
        ]
    }

    fn owner_pilot_id(&self) -> Option<&str> {
        Some(&self.pilot_id)
    }
}

impl Resource for Client {
    const PATH: &'static str = "/clients";
    const LABEL: &'static str = "client";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self, _directory: &FleetData) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            opt(&self.contact_name),
            opt(&self.email),
            opt(&self.phone)
        )
    }

    fn category(&self) -> Option<String> {
        Some(self.client_type.to_string())
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Contact", "Email", "Type", "Active"]
    }

    fn row(&self, _directory: &FleetData) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            opt(&self.contact_name),
            opt(&self.email),
            self.client_type.to_string(),
            if self.active { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl Resource for Qualification {
    const PATH: &'static str = "/qualifications";
    const LABEL: &'static str = "qualification";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self, _directory: &FleetData) -> String {
        format!("{} {} {}", self.name, self.pilot_id, self.issuing_authority)
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Pilot", "Qualification", "Issued", "Expires", "Authority"]
    }

    fn row(&self, _directory: &FleetData) -> Vec<String> {
        vec![
            self.id.clone(),
            self.pilot_id.clone(),
            self.name.clone(),
            self.issue_date.to_string(),
            opt_date(self.expiry_date),
            self.issuing_authority.clone(),
        ]
    }

    fn owner_pilot_id(&self) -> Option<&str> {
        Some(&self.pilot_id)
    }

    fn attachment(&self) -> Option<&str> {
        self.document_url.as_deref()
    }

    fn attach(&mut self, url: String) -> bool {
        self.document_url = Some(url);
        true
    }

    fn expiry(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        Some(self.expiry_status(today))
    }
}

impl Resource for MedicalCertificate {
    const PATH: &'static str = "/medical-certificates";
    const LABEL: &'static str = "medical certificate";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self, _directory: &FleetData) -> String {
        format!("{} {} {}", self.class, self.pilot_id, self.issuing_authority)
    }

    fn category(&self) -> Option<String> {
        Some(self.class.clone())
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Pilot", "Class", "Issued", "Expires", "Authority"]
    }

    fn row(&self, _directory: &FleetData) -> Vec<String> {
        vec![
            self.id.clone(),
            self.pilot_id.clone(),
            self.class.clone(),
            self.issue_date.to_string(),
            opt_date(self.expiry_date),
            self.issuing_authority.clone(),
        ]
    }

    fn owner_pilot_id(&self) -> Option<&str> {
        Some(&self.pilot_id)
    }

    fn attachment(&self) -> Option<&str> {
        self.document_url.as_deref()
    }

    fn attach(&mut self, url: String) -> bool {
        self.document_url = Some(url);
        true
    }

    fn expiry(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        Some(self.expiry_status(today))
    }
}

impl Resource for TrainingCourse {
    const PATH: &'static str = "/training-courses";
    const LABEL: &'static str = "training course";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self, _directory: &FleetData) -> String {
        format!("{} {} {}", self.course_name, self.pilot_id, self.instructor)
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Pilot", "Course", "Completed", "Expires", "Instructor"]
    }

    fn row(&self, _directory: &FleetData) -> Vec<String> {
        vec![
            self.id.clone(),
            self.pilot_id.clone(),
            self.course_name.clone(),
            self.issue_date.to_string(),
            opt_date(self.expiry_date),
            self.instructor.clone(),
        ]
    }

    fn owner_pilot_id(&self) -> Option<&str> {
        Some(&self.pilot_id)
    }

    fn attachment(&self) -> Option<&str> {
        self.document_url.as_deref()
    }

    fn attach(&mut self, url: String) -> bool {
        self.document_url = Some(url);
        true
    }

    fn expiry(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        Some(self.expiry_status(today))
    }
}

impl Resource for PracticalTraining {
    const PATH: &'static str = "/practical-training";
    const LABEL: &'static str = "practical training";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self, _directory: &FleetData) -> String {
        format!("{} {} {}", self.exercise, self.pilot_id, self.instructor)
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Pilot", "Exercise", "Flown", "Expires", "Instructor"]
    }

    fn row(&self, _directory: &FleetData) -> Vec<String> {
        vec![
            self.id.clone(),
            self.pilot_id.clone(),
            self.exercise.clone(),
            self.issue_date.to_string(),
            opt_date(self.expiry_date),
            self.instructor.clone(),
        ]
    }

    fn owner_pilot_id(&self) -> Option<&str> {
        Some(&self.pilot_id)
    }

    fn attachment(&self) -> Option<&str> {
        self.document_url.as_deref()
    }

    fn attach(&mut self, url: String) -> bool {
        self.document_url = Some(url);
        true
    }

    fn expiry(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        Some(self.expiry_status(today))
    }
}

impl Resource for LibraryDocument {
    const PATH: &'static str = "/library";
    const LABEL: &'static str = "document";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self, _directory: &FleetData) -> String {
        format!("{} {} {}", self.name, self.file_type, self.uploaded_by)
    }

    fn category(&self) -> Option<String> {
        Some(self.category.clone())
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Category", "Type", "Size", "Uploaded by"]
    }

    fn row(&self, _directory: &FleetData) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.category.clone(),
            self.file_type.clone(),
            format!("{:.1} KB", self.file_size as f64 / 1024.0),
            self.uploaded_by.clone(),
        ]
    }

    fn attachment(&self) -> Option<&str> {
        Some(self.file_url.as_str()).filter(|url| !url.is_empty())
    }

    fn attach(&mut self, url: String) -> bool {
        self.file_url = url;
        true
    }
}

impl Resource for GroundSupport {
    const PATH: &'static str = "/ground-support";
    const LABEL: &'static str = "ground support member";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self, _directory: &FleetData) -> String {
        format!("{} {} {} {}", self.name, self.role, opt(&self.email), opt(&self.phone))
    }

    fn category(&self) -> Option<String> {
        Some(self.role.clone())
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Role", "Phone", "Email", "Active"]
    }

    fn row(&self, _directory: &FleetData) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.role.clone(),
            opt(&self.phone),
            opt(&self.email),
            if self.active { "yes" } else { "no" }.to_string(),
        ]
    }
}
