//! Error types for the eligible revenue engine.
//!
//! Business ineligibility is never an error: it is a normal
//! [`EligibilityResult`](crate::models::EligibilityResult) with `eligible = false`.
//! The variants here cover contract violations at the engine boundary and
//! failures of the catalogue configuration layer.

use thiserror::Error;

use crate::models::EmploymentStatus;

/// The main error type for the eligible revenue engine.
///
/// # Example
///
/// ```
/// use revenue_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "common.fixed_monthly_salary".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid input 'common.fixed_monthly_salary': must not be negative"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller broke the input contract (mismatched status variant,
    /// negative amount, out-of-range list or count).
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// Path of the offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The status catalogue has no usable entry for a status.
    #[error("Status not configured in catalogue: {status}")]
    StatusNotConfigured {
        /// The status that is missing from the catalogue.
        status: EmploymentStatus,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
