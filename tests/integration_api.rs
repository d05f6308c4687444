//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use solar_econ::api::{AppState, router};
use solar_econ::config::ScenarioConfig;
use solar_econ::projection::Projection;

/// Build a full projection and return the API state.
fn build_api_state(cfg: ScenarioConfig) -> Arc<AppState> {
    let proj = Projection::from_scenario(&cfg);
    Arc::new(AppState {
        summary: proj.summary(),
        cashflow: proj.active_cashflow().years.clone(),
        scenario: cfg,
    })
}

#[tokio::test]
async fn full_scenario_summary_endpoint() {
    let state = build_api_state(ScenarioConfig::baseline());
    let app = router(state);

    let req = Request::builder()
        .uri("/summary")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Scenario config round-trips through the API
    assert_eq!(json["scenario"]["system"]["kwp"], 4.0);
    assert_eq!(json["scenario"]["system"]["battery_kwh"], 5.0);
    assert_eq!(json["scenario"]["demand"]["heating"], "gas");

    // Headline figures are present and finite
    assert!(
        json["summary"]["annual_generation_kwh"]
            .as_f64()
            .unwrap()
            .is_finite()
    );
    assert!(json["summary"]["npv_gbp"].as_f64().unwrap().is_finite());
    assert!(json["summary"]["payback_year"].is_number());
}

#[tokio::test]
async fn full_scenario_cashflow_endpoint() {
    let state = build_api_state(ScenarioConfig::baseline());
    let app = router(state);

    let req = Request::builder()
        .uri("/cashflow")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();

    assert_eq!(records.len(), 25);

    let first = &records[0];
    assert_eq!(first["year"], 1);
    assert!(first.get("grid_price_p").is_some());
    assert!(first.get("saving_gbp").is_some());
    assert!(first.get("net_benefit_gbp").is_some());
    assert!(first.get("cumulative_gbp").is_some());
    assert!(first.get("discounted_gbp").is_some());

    // Cumulative position recovers over the horizon
    let last = &records[24];
    assert!(last["cumulative_gbp"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn full_scenario_cashflow_range() {
    let state = build_api_state(ScenarioConfig::financed());
    let app = router(state);

    let req = Request::builder()
        .uri("/cashflow?from=10&to=15")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();

    assert_eq!(records.len(), 6);
    assert_eq!(records[0]["year"], 10);
    assert_eq!(records[5]["year"], 15);
}
