//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::debug;

use super::AppState;
use super::types::{
    BatterySystemRequest, ErrorResponse, GridTieRequest, PanelEntry, SizingResponse, WaterRequest,
};
use crate::config::{DesignConfig, DesignError};
use crate::sizing::SystemKind;

type ApiResult = Result<Json<SizingResponse>, (StatusCode, Json<ErrorResponse>)>;

/// `POST /size/off-grid` → 200 + `SizingResponse`, 422 on rejection
pub async fn size_off_grid(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatterySystemRequest>,
) -> ApiResult {
    run(&state, request.into_design(SystemKind::OffGrid, state.heuristics))
}

/// `POST /size/hybrid` → 200 + `SizingResponse`, 422 on rejection
pub async fn size_hybrid(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatterySystemRequest>,
) -> ApiResult {
    run(&state, request.into_design(SystemKind::Hybrid, state.heuristics))
}

/// `POST /size/grid-tie` → 200 + `SizingResponse`, 422 on rejection
pub async fn size_grid_tie(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GridTieRequest>,
) -> ApiResult {
    run(&state, request.into_design(state.heuristics))
}

/// `POST /size/water` → 200 + `SizingResponse`, 422 on rejection
pub async fn size_water(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WaterRequest>,
) -> ApiResult {
    run(&state, request.into_design(state.heuristics))
}

/// `GET /panels` → 200 + `Vec<PanelEntry>`
pub async fn list_panels(State(state): State<Arc<AppState>>) -> Json<Vec<PanelEntry>> {
    Json(
        state
            .catalog
            .iter()
            .map(|(model, panel)| PanelEntry {
                model: model.to_string(),
                wattage_w: panel.wattage_w,
                isc_a: panel.isc_a,
            })
            .collect(),
    )
}

fn run(state: &AppState, design: DesignConfig) -> ApiResult {
    match design.size(&state.catalog) {
        Ok(result) => Ok(Json(result.into())),
        Err(err) => {
            debug!(system = %design.system, error = %err, "sizing request rejected");
            Err((status_for(&err), Json(ErrorResponse {
                error: err.to_string(),
            })))
        }
    }
}

/// Unknown panel models are a bad request; everything else is unprocessable.
fn status_for(err: &DesignError) -> StatusCode {
    match err {
        DesignError::Invalid(errors) if errors.iter().any(|e| e.field == "panel.model") => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState::default())
    }

    async fn post(uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or_default())
    }

    const LAMPS: &str =
        r#"{"loads": [{"name": "Lamp", "power_w": 100, "quantity": 2, "hours": 5}]}"#;

    #[tokio::test]
    async fn off_grid_returns_200() {
        let (status, json) = post("/size/off-grid", LAMPS).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["system"], "off-grid");
        assert_eq!(json["result"]["inverter"]["recommended_kw"], 0.3);
        assert!(json["diagram"].as_array().is_some_and(|d| !d.is_empty()));
    }

    #[tokio::test]
    async fn hybrid_returns_class_inverter() {
        let (status, json) = post("/size/hybrid", LAMPS).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["system"], "hybrid");
        assert_eq!(json["result"]["inverter"]["recommended_kw"], 1.5);
    }

    #[tokio::test]
    async fn empty_loads_return_422() {
        let (status, json) = post("/size/off-grid", r#"{"loads": []}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            json["error"]
                .as_str()
                .is_some_and(|e| e.contains("zero"))
        );
    }

    #[tokio::test]
    async fn grid_tie_returns_savings() {
        let (status, json) = post(
            "/size/grid-tie",
            r#"{"grid_tie": {"system_size_kw": 5, "price_per_unit": 4}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["panels"], 13);
    }

    #[tokio::test]
    async fn grid_tie_zero_price_returns_422() {
        let (status, json) = post("/size/grid-tie", r#"{"grid_tie": {"price_per_unit": 0}}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn water_returns_pump_class() {
        let (status, json) = post("/size/water", r#"{"water": {"sprinklers_per_zone": 4}}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["pump"]["class"], "0.5 HP");
    }

    #[tokio::test]
    async fn unknown_panel_returns_400() {
        let (status, json) = post("/size/water", r#"{"panel": {"model": "999W"}}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn panels_lists_catalog() {
        let app = router(make_test_state());
        let req = Request::builder()
            .uri("/panels")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 4);
        assert!(json.iter().any(|p| p["model"] == "400W"));
    }
}
