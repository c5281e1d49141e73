use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use stockwise_core::risk::RiskSummary;
use stockwise_core::{Answer, ForecastError, RiskAssessment, SearchHit, SupplyChain};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub k: Option<usize>,
}

#[derive(Deserialize)]
pub struct AskParams {
    pub q: String,
}

#[derive(Deserialize)]
pub struct ForecastParams {
    pub days: Option<usize>,
}

#[derive(Deserialize)]
pub struct RiskParams {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}
fn default_top_n() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct RiskResponse {
    pub summary: RiskSummary,
    pub assessments: Vec<RiskAssessment>,
}

pub type AppState = Arc<SupplyChain>;

pub fn build_app(system: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/ask", get(ask_handler))
        .route("/forecast/:sku", get(forecast_handler))
        .route("/items/:sku", get(item_handler))
        .route("/risks", get(risks_handler))
        .with_state(system)
        .layer(cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref()))
        .layer(TraceLayer::new_for_http())
}

/// Origins from a comma-separated list; any origin when the list is unset
/// or holds no parseable entry.
pub fn cors_layer(allowed: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let allow_origin = if origins.is_empty() { AllowOrigin::any() } else { AllowOrigin::list(origins) };
    CorsLayer::new().allow_origin(allow_origin).allow_methods(Any).allow_headers(Any)
}

/// Serve on `addr` until `shutdown` resolves.
///
/// Owns its runtime and drops it before the last handle on `system`, so the
/// blocking generator client is released off the runtime threads.
pub fn serve<F>(system: AppState, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    let app = build_app(system.clone());
    let result = runtime.block_on(async move {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "server listening");
        axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
        tracing::info!("server stopped");
        Ok::<(), anyhow::Error>(())
    });
    drop(runtime);
    drop(system);
    result
}

pub async fn search_handler(State(system): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let k = params.k.unwrap_or(system.config().search_top_k);
    let results = system.search(&params.q, k);
    let total_hits = system.engine().scores(&params.q).iter().filter(|s| **s > 0.0).count();
    Json(SearchResponse { query: params.q, took_s: start.elapsed().as_secs_f64(), total_hits, results })
}

pub async fn ask_handler(State(system): State<AppState>, Query(params): Query<AskParams>) -> Result<Json<Answer>, ApiError> {
    // Generation blocks on the backend; keep it off the runtime threads.
    let answer = tokio::task::spawn_blocking(move || system.ask(&params.q))
        .await
        .map_err(|err| ApiError::internal(format!("answer task failed: {err}")))?;
    Ok(Json(answer))
}

pub async fn forecast_handler(
    State(system): State<AppState>,
    Path(sku): Path<String>,
    Query(params): Query<ForecastParams>,
) -> Response {
    let days = params.days.unwrap_or(system.config().forecast_days);
    match system.forecast_demand(&sku, days) {
        Ok(forecast) => Json(forecast).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn item_handler(State(system): State<AppState>, Path(sku): Path<String>) -> Response {
    match system.item(&sku) {
        Some(item) => Json(item.clone()).into_response(),
        None => ApiError::from(ForecastError::UnknownItem(sku)).into_response(),
    }
}

pub async fn risks_handler(State(system): State<AppState>, Query(params): Query<RiskParams>) -> Json<RiskResponse> {
    let assessments = system.analyze_risks(params.top_n);
    let summary = RiskSummary::from_assessments(&assessments);
    Json(RiskResponse { summary, assessments })
}

/// JSON error body: `{"error": "..."}`.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: String) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message }
    }
}

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        let status = match err {
            ForecastError::UnknownItem(_) => StatusCode::NOT_FOUND,
            ForecastError::InvalidHorizon => StatusCode::BAD_REQUEST,
            ForecastError::EmptyHistory | ForecastError::NonIncreasingDates { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };
        Self { status, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status, error = %self.message, "request failed");
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}
