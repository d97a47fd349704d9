// Standard library imports
use std::any::Any;
use std::sync::Arc;

// Third party imports
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as CorsAny, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, warn};

// Internal imports
use brandpulse_common::{ApiErrorResponse, ApiResponse};

use crate::config::Config;
use crate::error::MonitorResult;
use crate::sentiment::{
    AnalysisInput, AnalysisReport, AnalysisSource, AuxiliarySignals, Category, Emotion, Priority,
};
use crate::service::{fallback_report, SentimentService};

pub struct AppState {
    pub config: Arc<Config>,
    pub service: SentimentService,
}

impl AppState {
    pub fn new(config: Arc<Config>, service: SentimentService) -> Self {
        Self { config, service }
    }
}

/// Body của request phân tích
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub text: Option<String>,
    pub message: Option<String>,
    pub mention: Option<MentionPayload>,
    pub viral_potential: Option<f64>,
    #[serde(default)]
    pub brand_keywords: Vec<String>,
    #[serde(default)]
    pub competitor_keywords: Vec<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct MentionPayload {
    pub content: Option<MentionContent>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct MentionContent {
    pub text: Option<String>,
}

impl AnalyzeRequest {
    /// Lấy text theo thứ tự `text`, `message`, `mention.content.text`
    pub fn resolve_text(&self) -> Option<&str> {
        let mention_text = self
            .mention
            .as_ref()
            .and_then(|m| m.content.as_ref())
            .and_then(|c| c.text.as_deref());

        [self.text.as_deref(), self.message.as_deref(), mention_text]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
    }

    /// Chuyển thành đầu vào phân tích, `None` nếu thiếu text
    pub fn into_input(self) -> Option<AnalysisInput> {
        let text = self.resolve_text()?.to_string();
        Some(AnalysisInput::new(text).with_signals(AuxiliarySignals {
            viral_potential: self.viral_potential,
            brand_keywords: self.brand_keywords,
            competitor_keywords: self.competitor_keywords,
        }))
    }
}

/// Phản hồi phân tích dạng phẳng
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub score: f64,
    pub sentiment_score: f64,
    pub emotion: Emotion,
    pub confidence: f64,
    pub reasoning: String,
    pub keywords: Vec<String>,
    pub priority: Priority,
    pub category: Category,
    pub brand_mentions: Vec<String>,
    pub competitor_mentions: Vec<String>,
    pub source: AnalysisSource,
}

impl From<AnalysisReport> for AnalyzeResponse {
    fn from(report: AnalysisReport) -> Self {
        let AnalysisReport {
            sentiment,
            classification,
            source,
        } = report;

        Self {
            score: sentiment.score,
            sentiment_score: sentiment.score,
            emotion: sentiment.emotion,
            confidence: sentiment.confidence,
            reasoning: sentiment.reasoning,
            keywords: sentiment.keywords,
            priority: classification.priority,
            category: classification.category,
            brand_mentions: classification.brand_mentions,
            competitor_mentions: classification.competitor_mentions,
            source,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub items: Vec<AnalyzeRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<AnalyzeResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub analyzer: String,
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new(StatusCode::BAD_REQUEST.as_u16(), message)),
    )
        .into_response()
}

fn fallback_response(reason: &str) -> Response {
    (StatusCode::OK, Json(AnalyzeResponse::from(fallback_report(reason)))).into_response()
}

// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse::success(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        analyzer: state.service.analyzer_name().to_string(),
    }))
}

async fn analyze_sentiment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Body không hợp lệ, trả kết quả fallback: {}", rejection.body_text());
            return fallback_response("request body could not be parsed");
        }
    };

    let Some(input) = request.into_input() else {
        return bad_request("Text is required");
    };

    let report = state.service.analyze(&input).await;
    Json(AnalyzeResponse::from(report)).into_response()
}

async fn analyze_batch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let Json(batch) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Batch body không hợp lệ: {}", rejection.body_text());
            return bad_request("Invalid batch body");
        }
    };

    let max = state.config.max_batch_size;
    if batch.items.len() > max {
        return bad_request(format!("Batch exceeds the limit of {} items", max));
    }

    let mut inputs = Vec::with_capacity(batch.items.len());
    for (index, item) in batch.items.into_iter().enumerate() {
        match item.into_input() {
            Some(input) => inputs.push(input),
            None => return bad_request(format!("Text is required (item {})", index)),
        }
    }

    let results = state
        .service
        .analyze_batch(&inputs)
        .await
        .into_iter()
        .map(AnalyzeResponse::from)
        .collect();

    Json(BatchResponse { results }).into_response()
}

fn handle_panic(_err: Box<dyn Any + Send + 'static>) -> Response {
    error!("Handler panic, trả kết quả fallback");
    fallback_response("unexpected processing failure")
}

// Định nghĩa router chính
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_headers(CorsAny)
        .allow_methods(CorsAny)
        .allow_origin(CorsAny);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/sentiment/analyze", post(analyze_sentiment))
        .route("/api/sentiment/batch", post(analyze_batch))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Khởi động API server, dừng khi nhận Ctrl+C
pub async fn create_api_server(state: Arc<AppState>) -> MonitorResult<()> {
    let addr = state.config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("API server starting on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Đã nhận tín hiệu tắt, đang dừng API server..."),
        Err(e) => error!("Không thể bắt tín hiệu CTRL+C: {}", e),
    }
}
