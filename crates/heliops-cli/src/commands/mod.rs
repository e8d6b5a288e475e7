//! CLI command implementations
//!
//! Each subcommand group has its own module. Commands that work on any
//! backend entity take a [`ResourceKind`] and dispatch through
//! [`with_resource!`] to code generic over [`Resource`](crate::api::Resource).

use clap::ValueEnum;

pub mod auth;
pub mod config;
pub mod fleet;
pub mod records;
pub mod settings;
pub mod upload;

/// Entity collections reachable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Pilots,
    Helicopters,
    Flights,
    Clients,
    Qualifications,
    #[value(name = "medical-certificates", alias = "medical")]
    MedicalCertificates,
    #[value(name = "training-courses", alias = "courses")]
    TrainingCourses,
    #[value(name = "practical-training", alias = "practical")]
    PracticalTraining,
    Library,
    #[value(name = "ground-support", alias = "ground")]
    GroundSupport,
}

impl ResourceKind {
    /// Records tied to a pilot; their listing accepts `pilotId`
    pub fn is_pilot_record(self) -> bool {
        matches!(
            self,
            ResourceKind::Qualifications
                | ResourceKind::MedicalCertificates
                | ResourceKind::TrainingCourses
                | ResourceKind::PracticalTraining
        )
    }

    /// Records owned by a pilot: flights and pilot records
    pub fn has_pilot(self) -> bool {
        self == ResourceKind::Flights || self.is_pilot_record()
    }
}

/// Bind the model type for `$kind` to `$ty` and evaluate `$body`
#[macro_export]
macro_rules! with_resource {
    ($kind:expr, $ty:ident => $body:expr) => {{
        use heliops_common::models as m;
        use $crate::commands::ResourceKind as K;
        match $kind {
            K::Pilots => {
                type $ty = m::User;
                $body
            },
            K::Helicopters => {
                type $ty = m::Helicopter;
                $body
            },
            K::Flights => {
                type $ty = m::Flight;
                $body
            },
            K::Clients => {
                type $ty = m::Client;
                $body
            },
            K::Qualifications => {
                type $ty = m::Qualification;
                $body
            },
            K::MedicalCertificates => {
                type $ty = m::MedicalCertificate;
                $body
            },
            K::TrainingCourses => {
                type $ty = m::TrainingCourse;
                $body
            },
            K::PracticalTraining => {
                type $ty = m::PracticalTraining;
                $body
            },
            K::Library => {
                type $ty = m::LibraryDocument;
                $body
            },
            K::GroundSupport => {
                type $ty = m::GroundSupport;
                $body
            },
        }
    }};
}
