//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{CashflowQuery, ErrorResponse, SummaryResponse};
use crate::model::finance::YearCashflow;

/// Returns the scenario config and headline figures.
///
/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        scenario: state.scenario.clone(),
        summary: state.summary,
    })
}

/// Returns cashflow years, optionally filtered by year range.
///
/// `GET /cashflow` → 200 + `Vec<YearCashflow>` JSON
/// `GET /cashflow?from=N&to=M` → filtered range (inclusive)
/// `GET /cashflow?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_cashflow(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CashflowQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let years: Vec<YearCashflow> = state
        .cashflow
        .iter()
        .filter(|y| y.year >= from && y.year <= to)
        .copied()
        .collect();

    Ok(Json(years))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::ScenarioConfig;
    use crate::projection::Projection;

    fn make_test_state() -> Arc<AppState> {
        let scenario = ScenarioConfig::baseline();
        let proj = Projection::from_scenario(&scenario);
        Arc::new(AppState {
            scenario,
            summary: proj.summary(),
            cashflow: proj.active_cashflow().years.clone(),
        })
    }

    #[tokio::test]
    async fn summary_returns_200() {
        let state = make_test_state();
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
        assert!(json.get("scenario").is_some());
        assert!(json.get("summary").is_some());
        assert!(json["summary"].get("npv_gbp").is_some());
        assert_eq!(json["scenario"]["system"]["kwp"], 4.0);
    }

    #[tokio::test]
    async fn cashflow_returns_all_years() {
        let state = make_test_state();
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
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 25);
        assert_eq!(json[0]["year"], 1);
    }

    #[tokio::test]
    async fn cashflow_range_query() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/cashflow?from=5&to=10")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 6); // years 5 through 10
        assert_eq!(json[0]["year"], 5);
        assert_eq!(json[5]["year"], 10);
    }

    #[tokio::test]
    async fn cashflow_invalid_range_returns_400() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/cashflow?from=10&to=5")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("error").is_some());
    }
}
