//! Simulation endpoints
//!
//! `POST /api/v1/simulate` runs one simulation and returns the raw results,
//! the formatted table and Chart.js chart definitions. `GET /api/v1/presets`
//! lists the dashboard presets.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use lln_core::config::{ChartOptions, Preset, RunConfig};
use lln_core::presenter::{ChartJsLineChart, ChartJsVisualiser, ResultTable};
use lln_core::{simulator, AxisScale, SeedPolicy, SimulationError, TrialResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::AppState;

/// Simulation request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRequest {
    /// Success probability in [0, 1]
    pub p: f64,
    /// Fixed seed; the preset's policy applies when absent
    pub seed: Option<u64>,
    /// Append n = 10,000,000 to the standard sample sizes
    #[serde(default)]
    pub include_large_n: bool,
    /// Explicit sample sizes, replacing the standard set
    pub sample_sizes: Option<Vec<u64>>,
    pub preset: Option<Preset>,
    /// Override the preset's x-axis scale
    pub x_scale: Option<AxisScale>,
    /// Override the preset's reference line
    pub reference_line: Option<bool>,
}

/// Simulation response body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub preset: Preset,
    pub seed: u64,
    pub seeded: bool,
    pub p: f64,
    pub results: Vec<TrialResult>,
    pub table: ResultTable,
    pub charts: Vec<ChartJsLineChart>,
    pub caption: String,
}

/// Preset description
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetInfo {
    pub name: Preset,
    pub title: String,
    pub seed_policy: SeedPolicy,
    pub chart_options: ChartOptions,
    pub caption: String,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Request failures
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not valid JSON or does not match [`SimulateRequest`]
    #[error("Malformed request body: {0}")]
    MalformedRequest(String),

    #[error(transparent)]
    InvalidInput(#[from] SimulationError),

    #[error("Sample size {n} exceeds the configured maximum of {max}")]
    SampleSizeTooLarge { n: u64, max: u64 },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match &self {
            ApiError::MalformedRequest(_) => "malformed_request",
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::SampleSizeTooLarge { .. } => "sample_size_too_large",
        };
        let body = ErrorResponse {
            error: error.to_string(),
            message: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Build the simulation routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/simulate", post(simulate_handler))
        .route("/api/v1/presets", get(presets_handler))
}

/// Translate a request into a validated run configuration
pub fn run_config(request: &SimulateRequest, default_preset: Preset) -> Result<RunConfig, ApiError> {
    let preset = request.preset.unwrap_or(default_preset);

    let mut chart_options = preset.chart_options();
    if let Some(x_scale) = request.x_scale {
        chart_options.x_scale = x_scale;
    }
    if let Some(reference_line) = request.reference_line {
        chart_options.reference_line = reference_line;
    }

    let mut builder = RunConfig::builder()
        .preset(preset)
        .probability(request.p)
        .maybe_seed(request.seed)
        .include_large_n(request.include_large_n)
        .chart_options(chart_options);
    if let Some(sizes) = &request.sample_sizes {
        builder = builder.sample_sizes(sizes.clone());
    }

    Ok(builder.build()?)
}

/// POST /api/v1/simulate - Run a simulation
async fn simulate_handler(
    State(state): State<AppState>,
    request: Result<Json<SimulateRequest>, JsonRejection>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let Json(request) = request.inspect_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected malformed simulate request");
    })?;
    let config = run_config(&request, state.config.default_preset)?;

    let max = state.config.max_sample_size;
    let largest = config.sample_sizes().max();
    if largest > max {
        tracing::warn!(n = largest, max, "Rejected oversized sample size");
        return Err(ApiError::SampleSizeTooLarge { n: largest, max });
    }

    let run = simulator::run(&config)?;
    let visualiser = ChartJsVisualiser::new(config.chart_options());

    tracing::info!(
        preset = %config.preset(),
        seed = run.seed,
        large_n = config.sample_sizes().includes_large(),
        p = run.p,
        mean_deviation = run.mean_deviation(),
        "Simulation completed"
    );

    Ok(Json(SimulateResponse {
        preset: config.preset(),
        seed: run.seed,
        seeded: run.seeded,
        p: run.p,
        table: ResultTable::from_results(&run.results),
        charts: visualiser.charts(&run.results, run.p),
        caption: config.preset().caption().to_string(),
        results: run.results,
    }))
}

/// GET /api/v1/presets - List dashboard presets
async fn presets_handler() -> Json<Vec<PresetInfo>> {
    let presets = Preset::ALL
        .iter()
        .map(|&preset| PresetInfo {
            name: preset,
            title: preset.title().to_string(),
            seed_policy: preset.seed_policy(),
            chart_options: preset.chart_options(),
            caption: preset.caption().to_string(),
        })
        .collect();
    Json(presets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(Arc::new(ServerConfig::default()))
    }

    async fn post_simulate(body: &str) -> (StatusCode, serde_json::Value) {
        let router = routes().with_state(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/simulate")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
    }

    #[test]
    fn test_run_config_applies_overrides() {
        let request = SimulateRequest {
            p: 0.2,
            x_scale: Some(AxisScale::Log10),
            reference_line: Some(true),
            ..Default::default()
        };
        let config = run_config(&request, Preset::Classic).unwrap();

        assert_eq!(config.seed_policy(), SeedPolicy::Fixed(42));
        assert_eq!(config.chart_options().x_scale, AxisScale::Log10);
        assert!(config.chart_options().reference_line);
    }

    #[test]
    fn test_run_config_uses_default_preset() {
        let request = SimulateRequest {
            p: 0.5,
            ..Default::default()
        };
        let config = run_config(&request, Preset::LogScale).unwrap();
        assert_eq!(config.preset(), Preset::LogScale);
        assert_eq!(config.seed_policy(), SeedPolicy::Entropy);
    }

    #[test]
    fn test_run_config_rejects_bad_probability() {
        let request = SimulateRequest {
            p: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            run_config(&request, Preset::Classic),
            Err(ApiError::InvalidInput(SimulationError::InvalidProbability(_)))
        ));
    }

    #[tokio::test]
    async fn test_simulate_classic_defaults() {
        let (status, json) = post_simulate(r#"{"p": 0.5}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["preset"], "classic");
        assert_eq!(json["seed"], 42);
        assert_eq!(json["seeded"], true);
        assert_eq!(json["results"].as_array().unwrap().len(), 4);
        assert_eq!(json["table"]["columns"][1], "result");
        assert_eq!(json["charts"].as_array().unwrap().len(), 2);
        assert_eq!(json["charts"][0]["options"]["scales"]["x"]["type"], "linear");
    }

    #[tokio::test]
    async fn test_simulate_is_deterministic_with_seed() {
        let body = r#"{"p": 0.3, "seed": 7, "includeLargeN": true}"#;
        let (_, first) = post_simulate(body).await;
        let (_, second) = post_simulate(body).await;

        assert_eq!(first["results"], second["results"]);
        assert_eq!(first["results"].as_array().unwrap().len(), 5);
        assert_eq!(first["results"][4]["n"], 10_000_000);
    }

    #[tokio::test]
    async fn test_simulate_log_scale_preset() {
        let (status, json) = post_simulate(r#"{"p": 0.5, "preset": "logScale"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["seeded"], false);
        assert_eq!(
            json["charts"][0]["options"]["scales"]["x"]["type"],
            "logarithmic"
        );
        assert_eq!(json["charts"][0]["data"]["datasets"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_simulate_rejects_invalid_probability() {
        let (status, json) = post_simulate(r#"{"p": 1.5}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_input");
        assert!(json["message"].as_str().unwrap().contains("Invalid probability"));
    }

    #[tokio::test]
    async fn test_simulate_rejects_malformed_bodies_as_json() {
        for body in [
            r#"{"seed": 3}"#,
            r#"{"p": 0.5, "seed": -1}"#,
            r#"{"p": 0.5, "seed": 1.5}"#,
            r#"{"p": "half"}"#,
            r#"{"p": 0.5, "preset": "spiral"}"#,
            "not json",
        ] {
            let (status, json) = post_simulate(body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
            assert_eq!(json["error"], "malformed_request", "{}", body);
            assert!(json["message"].as_str().unwrap().starts_with("Malformed request body"));
        }
    }

    #[tokio::test]
    async fn test_simulate_rejects_missing_content_type() {
        let router = routes().with_state(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/simulate")
                    .body(Body::from(r#"{"p": 0.5}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "malformed_request");
    }

    #[tokio::test]
    async fn test_simulate_accepts_command_line_preset_spelling() {
        let (status, json) = post_simulate(r#"{"p": 0.5, "preset": "log-scale"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["preset"], "logScale");
        assert_eq!(json["seeded"], false);
    }

    #[tokio::test]
    async fn test_simulate_rejects_zero_sample_size() {
        let (status, json) = post_simulate(r#"{"p": 0.5, "sampleSizes": [10, 0]}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_input");
    }

    #[tokio::test]
    async fn test_simulate_rejects_oversized_sample() {
        let (status, json) = post_simulate(r#"{"p": 0.5, "sampleSizes": [100000000]}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "sample_size_too_large");
    }

    #[tokio::test]
    async fn test_presets_endpoint() {
        let router = routes().with_state(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/presets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json[0]["name"], "classic");
        assert_eq!(json[0]["seedPolicy"]["fixed"], 42);
        assert_eq!(json[1]["name"], "logScale");
        assert_eq!(json[1]["seedPolicy"], "entropy");
        assert_eq!(json[1]["chartOptions"]["xScale"], "log10");
    }
}
