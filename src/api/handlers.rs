//! HTTP request handlers for the eligible revenue engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::currency_label;
use crate::config::ConfigLoader;
use crate::engine::{ENGINE_VERSION, evaluate};
use crate::error::EngineResult;
use crate::models::EmploymentStatus;

use super::request::EvaluationRequest;
use super::response::{
    ApiError, ApiErrorResponse, EvaluationResponse, FormattedFigures, StatusDocuments,
    StatusSummary,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate_handler))
        .route("/statuses", get(list_statuses_handler))
        .route("/statuses/:status/documents", get(status_documents_handler))
        .with_state(state)
}

/// Evaluates a request and decorates the result with its catalogue entry.
///
/// Shared by the `/evaluate` handler and the command-line `evaluate` mode.
pub fn build_response(
    evaluation_id: Uuid,
    request: &EvaluationRequest,
    catalogue: &ConfigLoader,
) -> EngineResult<EvaluationResponse> {
    let result = evaluate(request.status, &request.common, &request.inputs)?;
    let entry = catalogue.get_status(request.status)?;

    let formatted = FormattedFigures {
        monthly_eligible_revenue: currency_label(result.monthly_eligible_revenue),
        total_monthly_revenue: currency_label(result.total_monthly_revenue),
    };

    Ok(EvaluationResponse {
        evaluation_id,
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        result,
        required_documents: entry.documents.clone(),
        advisor_note: entry.advisor_note.clone(),
        formatted,
    })
}

/// Handler for POST /evaluate endpoint.
async fn evaluate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing evaluation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") || body_text.contains("unknown variant")
                    {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let start_time = Instant::now();
    match build_response(correlation_id, &request, state.catalogue()) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                status = %request.status,
                eligible = response.result.eligible,
                revenue = %response.result.monthly_eligible_revenue,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Evaluation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Evaluation rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for GET /statuses endpoint.
async fn list_statuses_handler(State(state): State<AppState>) -> impl IntoResponse {
    let summaries: Vec<StatusSummary> = state
        .catalogue()
        .statuses()
        .into_iter()
        .map(|(status, entry)| StatusSummary::new(status, entry))
        .collect();

    (StatusCode::OK, Json(summaries)).into_response()
}

/// Handler for GET /statuses/:status/documents endpoint.
async fn status_documents_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> impl IntoResponse {
    let status = match tag.parse::<EmploymentStatus>() {
        Ok(status) => status,
        Err(_) => {
            warn!(status = %tag, "Unknown status requested");
            return (StatusCode::NOT_FOUND, Json(ApiError::status_not_found(&tag)))
                .into_response();
        }
    };

    match state.catalogue().get_status(status) {
        Ok(entry) => (StatusCode::OK, Json(StatusDocuments::new(status, entry))).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}
