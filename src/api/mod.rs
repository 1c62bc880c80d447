//! HTTP API module for the eligible revenue engine.
//!
//! This module provides the REST API endpoints for evaluating a borrower's
//! eligible revenue and browsing the per-status document checklists.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{build_response, create_router};
pub use request::EvaluationRequest;
pub use response::{
    ApiError, ApiErrorResponse, EvaluationResponse, FormattedFigures, StatusDocuments,
    StatusSummary,
};
pub use state::AppState;
