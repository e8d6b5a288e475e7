//! Entity records exchanged with the backend as camelCase JSON

pub mod certification;
pub mod client;
pub mod flight;
pub mod helicopter;
pub mod library;
pub mod user;

pub use certification::{
    expiry_status, ExpiryStatus, MedicalCertificate, PilotRecord, PracticalTraining,
    Qualification, TrainingCourse,
};
pub use client::{Client, ClientType, Location};
pub use flight::{format_flight_hours, BillingStatus, Flight, FlightStatus};
pub use helicopter::{Helicopter, HelicopterStatus, HourlyRates};
pub use library::{GroundSupport, LibraryDocument};
pub use user::{User, UserRole};
