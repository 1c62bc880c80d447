//! End-to-end tests for the eligible revenue engine HTTP API.
//!
//! This test suite covers every status family through `POST /evaluate`:
//! - CDI contract basis, fiscal base, fallback and situation change
//! - Fixed-term contracts (CDD, CDIC)
//! - Multi-year averages (temp-agency, intermittent, seasonal)
//! - Single-formula statuses
//! - Catalogue endpoints
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use revenue_engine::api::{AppState, create_router};
use revenue_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/catalogue").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn post_evaluate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/evaluate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, read_json(response).await)
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    (status, read_json(response).await)
}

fn request(status: &str, fixed: &str, other: &str, inputs: Value) -> Value {
    let mut inputs = inputs;
    inputs["status"] = json!(status);
    json!({
        "status": status,
        "common": {
            "fixed_monthly_salary": fixed,
            "other_stable_monthly_income": other
        },
        "inputs": inputs
    })
}

fn revenue(body: &Value) -> Decimal {
    decimal(body["result"]["monthly_eligible_revenue"].as_str().unwrap())
}

fn total(body: &Value) -> Decimal {
    decimal(body["result"]["total_monthly_revenue"].as_str().unwrap())
}

fn warnings(body: &Value) -> Vec<String> {
    body["result"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w.as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// CDI
// =============================================================================

#[tokio::test]
async fn test_cdi_short_tenure_contract_basis() {
    let body = request(
        "cdi",
        "2500",
        "200",
        json!({
            "tenure_months": 6,
            "probation_completed": true,
            "executive": false,
            "contractual_annual_gross_salary": "30000",
            "contractual_annual_bonus": "0",
            "non_contractual_bonuses": ["0", "0", "0"]
        }),
    );

    let (status, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["eligible"], json!(true));
    assert_eq!(revenue(&body), decimal("1950.00"));
    assert_eq!(total(&body), decimal("2150.00"));
    assert_eq!(body["formatted"]["monthly_eligible_revenue"], json!("1 950.00 €"));
    assert_eq!(body["result"]["status"], json!("cdi"));
}

#[tokio::test]
async fn test_cdi_fiscal_base_minimum() {
    let body = request(
        "cdi",
        "2500",
        "0",
        json!({
            "tenure_months": 24,
            "probation_completed": true,
            "cumulative_taxable_income": "28000",
            "tax_return_taxable_income": "26000"
        }),
    );

    let (status, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(revenue(&body), decimal("2166.67"));
    let steps = body["result"]["audit_steps"].as_array().unwrap();
    assert_eq!(steps.last().unwrap()["output"]["path"], json!("fiscal_base"));
}

#[tokio::test]
async fn test_cdi_probation_not_completed() {
    let body = request(
        "cdi",
        "2500",
        "100",
        json!({
            "tenure_months": 3,
            "probation_completed": false,
            "contractual_annual_gross_salary": "30000"
        }),
    );

    let (status, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["eligible"], json!(false));
    assert_eq!(revenue(&body), Decimal::ZERO);
    assert_eq!(total(&body), decimal("2600.00"));
    assert!(!warnings(&body).is_empty());
}

#[tokio::test]
async fn test_cdi_fallback_adds_bonuses() {
    let body = request(
        "cdi",
        "2500",
        "0",
        json!({
            "tenure_months": 40,
            "probation_completed": true,
            "contractual_annual_bonus": "1200",
            "non_contractual_bonuses": ["1200", "1800"]
        }),
    );

    let (_, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(revenue(&body), decimal("2725.00"));
}

#[tokio::test]
async fn test_cdi_situation_change() {
    let body = request(
        "cdi",
        "2500",
        "0",
        json!({
            "tenure_months": 60,
            "probation_completed": true,
            "situation_change": { "recent_net_payslips": ["2100", "2200", "0"] }
        }),
    );

    let (_, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(revenue(&body), decimal("2150.00"));
}

// =============================================================================
// Fixed-term
// =============================================================================

#[tokio::test]
async fn test_cdd_zero_income_display_floor() {
    let body = request(
        "cdd",
        "1800",
        "200",
        json!({ "annual_taxable_income": "0", "remaining_contract_months": 6 }),
    );

    let (status, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["eligible"], json!(false));
    assert_eq!(revenue(&body), Decimal::ZERO);
    assert_eq!(total(&body), decimal("2000.00"));
    assert_eq!(body["formatted"]["total_monthly_revenue"], json!("2 000.00 €"));
}

#[tokio::test]
async fn test_cdic_contract_ending_soon() {
    let body = request(
        "cdic",
        "0",
        "0",
        json!({
            "annual_taxable_income": "30000",
            "annual_deductions": "0",
            "remaining_contract_months": 1
        }),
    );

    let (_, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(revenue(&body), decimal("2500.00"));
    assert!(warnings(&body).iter().any(|w| w.contains("Contract ending soon")));
}

// =============================================================================
// Multi-year averages
// =============================================================================

#[tokio::test]
async fn test_temp_agency_below_threshold_ignores_income() {
    let body = request(
        "temp_agency",
        "0",
        "0",
        json!({
            "annual_incomes": { "year_n": "50000", "year_n_minus_1": "50000", "year_n_minus_2": "50000" },
            "months_of_activity": 12
        }),
    );

    let (status, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["eligible"], json!(false));
    assert_eq!(revenue(&body), Decimal::ZERO);
}

#[tokio::test]
async fn test_seasonal_average_skips_empty_year() {
    let body = request(
        "seasonal",
        "0",
        "0",
        json!({
            "annual_incomes": { "year_n": "24000", "year_n_minus_1": "0", "year_n_minus_2": "22000" },
            "seasons_completed": 2
        }),
    );

    let (_, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(body["result"]["eligible"], json!(true));
    assert_eq!(revenue(&body), decimal("1916.67"));
}

#[tokio::test]
async fn test_intermittent_regularity_warning() {
    let body = request(
        "intermittent",
        "0",
        "0",
        json!({
            "annual_incomes": { "year_n": "30000", "year_n_minus_1": "24000" },
            "years_of_activity": 3
        }),
    );

    let (_, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(revenue(&body), decimal("2250.00"));
    assert!(!warnings(&body).is_empty());
}

// =============================================================================
// Single-formula statuses
// =============================================================================

#[tokio::test]
async fn test_multi_employer_sum() {
    let body = request(
        "multi_employer",
        "0",
        "0",
        json!({
            "employers": [
                { "annual_taxable_income": "18000" },
                { "annual_taxable_income": "12000" }
            ]
        }),
    );

    let (_, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(revenue(&body), decimal("2500.00"));
}

#[tokio::test]
async fn test_military_divides_by_three() {
    let body = request(
        "military",
        "0",
        "0",
        json!({ "annual_incomes": { "year_n": "30000", "year_n_minus_1": "28800", "year_n_minus_2": "27600" } }),
    );

    let (_, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(revenue(&body), decimal("2400.00"));
}

#[tokio::test]
async fn test_apprentice_expired_contract() {
    let body = request(
        "apprentice",
        "1000",
        "0",
        json!({ "annual_taxable_income": "14400", "remaining_contract_months": 0 }),
    );

    let (_, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(body["result"]["eligible"], json!(false));
    assert_eq!(revenue(&body), Decimal::ZERO);
}

#[tokio::test]
async fn test_foster_family_documents_attached() {
    let body = request(
        "foster_family",
        "0",
        "0",
        json!({ "annual_income_excluding_supplements": "20400" }),
    );

    let (_, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(revenue(&body), decimal("1700.00"));
    let documents = body["required_documents"].as_array().unwrap();
    assert!(documents.iter().any(|d| d.as_str().unwrap().contains("Approval")));
    assert!(!body["advisor_note"].as_str().unwrap().is_empty());
}

// =============================================================================
// Catalogue
// =============================================================================

#[tokio::test]
async fn test_list_statuses() {
    let (status, body) = get_json(create_router_for_test(), "/statuses").await;

    assert_eq!(status, StatusCode::OK);
    let statuses = body.as_array().unwrap();
    assert_eq!(statuses.len(), 14);
    assert_eq!(statuses[3]["status"], json!("temp_agency"));
    assert_eq!(statuses[3]["label"], json!("Temp-Agency"));
}

#[tokio::test]
async fn test_status_documents() {
    let (status, body) = get_json(create_router_for_test(), "/statuses/seasonal/documents").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("seasonal"));
    assert_eq!(body["documents"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_unknown_status_documents() {
    let (status, body) = get_json(create_router_for_test(), "/statuses/freelance/documents").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("STATUS_NOT_FOUND"));
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_negative_amount_returns_invalid_input() {
    let body = request(
        "multi_employer",
        "0",
        "0",
        json!({
            "employers": [
                { "annual_taxable_income": "18000" },
                { "annual_taxable_income": "-5" }
            ]
        }),
    );

    let (status, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("INVALID_INPUT"));
    assert_eq!(body["details"], json!("inputs.employers[1].annual_taxable_income"));
}

#[tokio::test]
async fn test_oversized_amount_returns_invalid_input() {
    let max = Decimal::MAX.to_string();
    let body = request(
        "multi_employer",
        "0",
        "0",
        json!({
            "employers": [
                { "annual_taxable_income": max },
                { "annual_taxable_income": max }
            ]
        }),
    );

    let (status, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("INVALID_INPUT"));
    assert_eq!(body["details"], json!("inputs.employers[0].annual_taxable_income"));
}

#[tokio::test]
async fn test_mismatched_status_returns_invalid_input() {
    let mut body = request(
        "cdd",
        "0",
        "0",
        json!({ "annual_taxable_income": "24000", "remaining_contract_months": 6 }),
    );
    body["status"] = json!("cdic");

    let (status, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("INVALID_INPUT"));
}

#[tokio::test]
async fn test_unknown_status_returns_validation_error() {
    let body = json!({
        "status": "freelance",
        "common": { "fixed_monthly_salary": "0" },
        "inputs": { "status": "freelance" }
    });

    let (status, body) = post_evaluate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_missing_content_type() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/evaluate")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["code"], json!("MISSING_CONTENT_TYPE"));
}
