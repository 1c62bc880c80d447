//! Response types for the eligible revenue engine API.
//!
//! This module defines the evaluation response, the catalogue views and the
//! error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::StatusEntry;
use crate::error::EngineError;
use crate::models::{EligibilityResult, EmploymentStatus};

/// Response body of a successful `/evaluate` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResponse {
    /// Unique identifier of this evaluation, also used as correlation id.
    pub evaluation_id: Uuid,
    /// When the evaluation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The engine result.
    pub result: EligibilityResult,
    /// Documents to request for this status, in checklist order.
    pub required_documents: Vec<String>,
    /// Advisor reminder for this status.
    pub advisor_note: String,
    /// Figures formatted for display.
    pub formatted: FormattedFigures,
}

/// Currency labels of the two headline figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedFigures {
    /// Eligible monthly revenue, e.g. `"1 950.00 €"`.
    pub monthly_eligible_revenue: String,
    /// Total monthly revenue, e.g. `"2 150.00 €"`.
    pub total_monthly_revenue: String,
}

/// One line of the `/statuses` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSummary {
    /// Status tag.
    pub status: EmploymentStatus,
    /// Label shown to advisors.
    pub label: String,
    /// Number of documents on the checklist.
    pub document_count: usize,
}

impl StatusSummary {
    /// Builds the summary of a catalogue entry.
    pub fn new(status: EmploymentStatus, entry: &StatusEntry) -> Self {
        Self {
            status,
            label: entry.label.clone(),
            document_count: entry.documents.len(),
        }
    }
}

/// Response body of `/statuses/:status/documents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDocuments {
    /// Status tag.
    pub status: EmploymentStatus,
    /// Label shown to advisors.
    pub label: String,
    /// Documents to request, in checklist order.
    pub documents: Vec<String>,
    /// Advisor reminder for this status.
    pub advisor_note: String,
}

impl StatusDocuments {
    /// Builds the checklist view of a catalogue entry.
    pub fn new(status: EmploymentStatus, entry: &StatusEntry) -> Self {
        Self {
            status,
            label: entry.label.clone(),
            documents: entry.documents.clone(),
            advisor_note: entry.advisor_note.clone(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a status not found error response.
    pub fn status_not_found(tag: &str) -> Self {
        Self::with_details(
            "STATUS_NOT_FOUND",
            format!("Status not found: {}", tag),
            format!("The status '{}' is not supported by this engine", tag),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input '{}': {}", field, message),
                    field,
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::StatusNotConfigured { status } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Status catalogue incomplete",
                    format!("Status not configured in catalogue: {}", status),
                ),
            },
        }
    }
}
