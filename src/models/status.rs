//! Employment status model.
//!
//! This module defines the closed set of employment statuses the engine
//! knows how to evaluate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The employment status of a borrower.
///
/// Each status selects exactly one income rule and one
/// [`StatusInputs`](super::StatusInputs) variant.
///
/// # Example
///
/// ```
/// use revenue_engine::models::EmploymentStatus;
///
/// let status: EmploymentStatus = "temp_agency".parse().unwrap();
/// assert_eq!(status, EmploymentStatus::TempAgency);
/// assert_eq!(status.display_name(), "Temp-Agency");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Permanent contract (CDI).
    Cdi,
    /// Fixed-term contract (CDD).
    Cdd,
    /// Project-bound permanent contract (CDI de chantier).
    Cdic,
    /// Temporary agency worker.
    TempAgency,
    /// Entertainment-industry intermittent worker.
    Intermittent,
    /// Seasonal worker.
    Seasonal,
    /// Member of the armed forces.
    Military,
    /// Civil-service trainee.
    PublicInternship,
    /// Registered childminder.
    ChildminderAssistant,
    /// Apprentice under an apprenticeship contract.
    Apprentice,
    /// Volunteer firefighter.
    VolunteerFirefighter,
    /// Elected official receiving mandate income.
    ElectedOfficial,
    /// Employee holding contracts with several employers.
    MultiEmployer,
    /// Approved foster family.
    FosterFamily,
}

impl EmploymentStatus {
    /// Every status, in catalogue order.
    pub const ALL: [EmploymentStatus; 14] = [
        EmploymentStatus::Cdi,
        EmploymentStatus::Cdd,
        EmploymentStatus::Cdic,
        EmploymentStatus::TempAgency,
        EmploymentStatus::Intermittent,
        EmploymentStatus::Seasonal,
        EmploymentStatus::Military,
        EmploymentStatus::PublicInternship,
        EmploymentStatus::ChildminderAssistant,
        EmploymentStatus::Apprentice,
        EmploymentStatus::VolunteerFirefighter,
        EmploymentStatus::ElectedOfficial,
        EmploymentStatus::MultiEmployer,
        EmploymentStatus::FosterFamily,
    ];

    /// The wire tag of the status (as used in JSON and YAML).
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Cdi => "cdi",
            EmploymentStatus::Cdd => "cdd",
            EmploymentStatus::Cdic => "cdic",
            EmploymentStatus::TempAgency => "temp_agency",
            EmploymentStatus::Intermittent => "intermittent",
            EmploymentStatus::Seasonal => "seasonal",
            EmploymentStatus::Military => "military",
            EmploymentStatus::PublicInternship => "public_internship",
            EmploymentStatus::ChildminderAssistant => "childminder_assistant",
            EmploymentStatus::Apprentice => "apprentice",
            EmploymentStatus::VolunteerFirefighter => "volunteer_firefighter",
            EmploymentStatus::ElectedOfficial => "elected_official",
            EmploymentStatus::MultiEmployer => "multi_employer",
            EmploymentStatus::FosterFamily => "foster_family",
        }
    }

    /// The name used in explanations and warnings.
    pub fn display_name(&self) -> &'static str {
        match self {
            EmploymentStatus::Cdi => "CDI",
            EmploymentStatus::Cdd => "CDD",
            EmploymentStatus::Cdic => "CDIC",
            EmploymentStatus::TempAgency => "Temp-Agency",
            EmploymentStatus::Intermittent => "Intermittent",
            EmploymentStatus::Seasonal => "Seasonal",
            EmploymentStatus::Military => "Military",
            EmploymentStatus::PublicInternship => "Public internship",
            EmploymentStatus::ChildminderAssistant => "Childminder assistant",
            EmploymentStatus::Apprentice => "Apprentice",
            EmploymentStatus::VolunteerFirefighter => "Volunteer firefighter",
            EmploymentStatus::ElectedOfficial => "Elected official",
            EmploymentStatus::MultiEmployer => "Multi-employer",
            EmploymentStatus::FosterFamily => "Foster family",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmploymentStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown employment status: {}", s))
    }
}
