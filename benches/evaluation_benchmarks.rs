//! Performance benchmarks for the eligible revenue engine.
//!
//! - Single CDI evaluation through the engine
//! - One evaluation per status, across all 14 statuses
//! - Full HTTP round trip through `POST /evaluate`
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use revenue_engine::api::{AppState, EvaluationRequest, create_router};
use revenue_engine::config::ConfigLoader;
use revenue_engine::engine::evaluate;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/catalogue").expect("Failed to load config");
    AppState::new(config)
}

/// One representative request per status.
fn requests() -> Vec<EvaluationRequest> {
    let bodies = [
        serde_json::json!({ "status": "cdi", "tenure_months": 6, "probation_completed": true,
            "contractual_annual_gross_salary": "30000", "contractual_annual_bonus": "1200",
            "non_contractual_bonuses": ["3000", "2400", "0"] }),
        serde_json::json!({ "status": "cdd", "annual_taxable_income": "26000",
            "annual_deductions": "2000", "remaining_contract_months": 10 }),
        serde_json::json!({ "status": "cdic", "annual_taxable_income": "30000",
            "remaining_contract_months": 2 }),
        serde_json::json!({ "status": "temp_agency", "months_of_activity": 20,
            "annual_incomes": { "year_n": "24000", "year_n_minus_1": "22000" } }),
        serde_json::json!({ "status": "intermittent", "years_of_activity": 4,
            "annual_incomes": { "year_n": "30000", "year_n_minus_1": "24000", "year_n_minus_2": "27000" } }),
        serde_json::json!({ "status": "seasonal", "seasons_completed": 2,
            "annual_incomes": { "year_n": "24000", "year_n_minus_1": "0", "year_n_minus_2": "22000" } }),
        serde_json::json!({ "status": "military",
            "annual_incomes": { "year_n": "30000", "year_n_minus_1": "28800", "year_n_minus_2": "27600" } }),
        serde_json::json!({ "status": "public_internship", "annual_taxable_income": "21000" }),
        serde_json::json!({ "status": "childminder_assistant", "annual_benefit_income": "19500" }),
        serde_json::json!({ "status": "apprentice", "annual_taxable_income": "14400",
            "remaining_contract_months": 12 }),
        serde_json::json!({ "status": "volunteer_firefighter", "taxable_income_year_n": "25000",
            "taxable_income_year_n_minus_1": "23000" }),
        serde_json::json!({ "status": "elected_official", "annual_mandate_income": "18000",
            "other_annual_income": "6000" }),
        serde_json::json!({ "status": "multi_employer", "employers": [
            { "annual_taxable_income": "18000" },
            { "annual_taxable_income": "12000", "fixed_term": true } ] }),
        serde_json::json!({ "status": "foster_family", "annual_income_excluding_supplements": "20400" }),
    ];

    bodies
        .into_iter()
        .map(|inputs| {
            let request = serde_json::json!({
                "status": inputs["status"].clone(),
                "common": { "fixed_monthly_salary": "2000", "other_stable_monthly_income": "150" },
                "inputs": inputs
            });
            serde_json::from_value(request).unwrap()
        })
        .collect()
}

/// Benchmark: a single CDI evaluation, no I/O.
fn bench_single_cdi(c: &mut Criterion) {
    let request = requests().remove(0);

    c.bench_function("single_cdi", |b| {
        b.iter(|| {
            black_box(evaluate(
                black_box(request.status),
                black_box(&request.common),
                black_box(&request.inputs),
            ))
        })
    });
}

/// Benchmark: one evaluation for each of the 14 statuses.
fn bench_all_statuses(c: &mut Criterion) {
    let requests = requests();

    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(requests.len() as u64));
    group.bench_function("all_statuses", |b| {
        b.iter(|| {
            for request in &requests {
                black_box(evaluate(request.status, &request.common, &request.inputs).unwrap());
            }
        })
    });

    for request in &requests {
        group.bench_with_input(
            BenchmarkId::new("status", request.status),
            request,
            |b, request| b.iter(|| black_box(evaluate(request.status, &request.common, &request.inputs))),
        );
    }

    group.finish();
}

/// Benchmark: HTTP round trip for a CDI evaluation.
fn bench_http_evaluate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::to_string(&requests().remove(0)).unwrap();

    c.bench_function("http_evaluate", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/evaluate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(benches, bench_single_cdi, bench_all_statuses, bench_http_evaluate);
criterion_main!(benches);
