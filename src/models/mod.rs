//! Core data models for the eligible revenue engine.
//!
//! This module contains the status enumeration, the input records and the
//! result contract shared by all income rules.

mod eligibility_result;
mod inputs;
mod status;

pub use eligibility_result::{AuditStep, EligibilityResult};
pub use inputs::{
    AnnualIncomeHistory, ApprenticeInputs, ChildminderAssistantInputs, CommonInputs,
    ElectedOfficialInputs, EmployerIncome, FixedTermInputs, FosterFamilyInputs,
    IntermittentInputs, MilitaryInputs, MultiEmployerInputs, PermanentInputs,
    PublicInternshipInputs, SeasonalInputs, SituationChange, StatusInputs, TempAgencyInputs,
    VolunteerFirefighterInputs,
};
pub use status::EmploymentStatus;
