//! Request types for the eligible revenue engine API.
//!
//! This module defines the JSON request structure for the `/evaluate` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::{CommonInputs, EmploymentStatus, StatusInputs};

/// Request body for the `/evaluate` endpoint.
///
/// The `status` field selects the rule; `inputs` carries its own `status`
/// tag, and the two must agree.
///
/// # Example
///
/// ```
/// use revenue_engine::api::EvaluationRequest;
/// use revenue_engine::models::EmploymentStatus;
///
/// let json = r#"{
///     "status": "military",
///     "common": { "fixed_monthly_salary": "2100", "other_stable_monthly_income": "0" },
///     "inputs": {
///         "status": "military",
///         "annual_incomes": { "year_n": "30000", "year_n_minus_1": "28800", "year_n_minus_2": "27600" }
///     }
/// }"#;
///
/// let request: EvaluationRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.status, EmploymentStatus::Military);
/// assert_eq!(request.inputs.status(), EmploymentStatus::Military);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The selected employment status.
    pub status: EmploymentStatus,
    /// Inputs shared by every status.
    pub common: CommonInputs,
    /// Status-specific inputs.
    pub inputs: StatusInputs,
}
