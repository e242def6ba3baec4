// src/api.rs
//! HTTP feed for the presentation layer (popup list + chart). The scorer does
//! not call out anywhere; this only exposes it.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::analysis::{top_comments, AnalysisResult};
use crate::comment::{AnalyzedComment, Comment};
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::sentiment::{Category, SentimentAnalyzer, SentimentResult};
use crate::source::{collect_comments, CommentSource, StaticSource};

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<SentimentAnalyzer>,
}

impl AppState {
    pub fn new(cfg: AnalyzerConfig) -> Self {
        Self {
            analyzer: Arc::new(SentimentAnalyzer::with_config(cfg)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .route("/analyze/batch", post(analyze_batch))
        .route("/analyze/top", post(analyze_top))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Router with a freshly built state.
pub fn create_router(cfg: AnalyzerConfig) -> Router {
    router(AppState::new(cfg))
}

#[derive(Debug)]
pub enum ApiError {
    Analysis(AnalysisError),
    BadRequest(String),
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        ApiError::Analysis(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Analysis(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
        };
        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

#[derive(Deserialize)]
struct AnalyzeReq {
    text: String,
}

async fn analyze(State(state): State<AppState>, Json(body): Json<AnalyzeReq>) -> Json<SentimentResult> {
    Json(state.analyzer.analyze_text(&body.text))
}

/// Posted comments go through the same cleanup, dedup and `max_comments` cap
/// as any other source. `index` in the response refers to that cleaned list.
async fn collect_posted(state: &AppState, posted: Option<Vec<Comment>>) -> Vec<Comment> {
    let sources: Vec<Box<dyn CommentSource>> =
        vec![Box::new(StaticSource::new(posted.unwrap_or_default()))];
    collect_comments(&sources, state.analyzer.config().max_comments).await
}

/// `null`, `[]` and a payload with only blank texts are all "no comments".
async fn analyze_batch(
    State(state): State<AppState>,
    Json(posted): Json<Option<Vec<Comment>>>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let comments = collect_posted(&state, posted).await;
    let result = state.analyzer.analyze_comments(comments).await?;
    Ok(Json(result))
}

#[derive(Deserialize)]
struct TopQuery {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    count: Option<usize>,
}

async fn analyze_top(
    State(state): State<AppState>,
    Query(q): Query<TopQuery>,
    Json(posted): Json<Option<Vec<Comment>>>,
) -> Result<Json<Vec<AnalyzedComment>>, ApiError> {
    let category = match q.category.as_deref() {
        Some(raw) => raw
            .parse::<Category>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => Category::Positive,
    };
    let count = q.count.unwrap_or(state.analyzer.config().top_count);

    let comments = collect_posted(&state, posted).await;
    let result = state.analyzer.analyze_comments(comments).await?;
    Ok(Json(top_comments(result.iter(), category, count)))
}
