use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use docrank_core::{Document, MatchPolicy, RankedResults, RankingEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    /// "and" (default from the engine config) or "or"
    pub policy: Option<String>,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub policy: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f64,
    pub title: String,
    pub url: String,
    pub title_score: f64,
    pub content_score: f64,
    pub bm25_title: f64,
    pub bm25_content: f64,
}

/// Shared, read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RankingEngine>,
}

type ApiError = (StatusCode, String);

pub fn build_app(engine: Arc<RankingEngine>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/results", get(results_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(AppState { engine })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn parse_policy(engine: &RankingEngine, raw: Option<&str>) -> Result<MatchPolicy, ApiError> {
    match raw {
        Some(s) => s.parse().map_err(|e: docrank_core::Error| (StatusCode::BAD_REQUEST, e.to_string())),
        None => Ok(engine.config().default_policy),
    }
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let engine = &state.engine;
    let policy = parse_policy(engine, params.policy.as_deref())?;

    let snapshot = engine.snapshot();
    let hits: Vec<SearchHit> = engine
        .rank(&params.q, policy)
        .into_iter()
        .filter_map(|rec| {
            let doc = snapshot.document(&rec.doc_id)?;
            Some(SearchHit {
                title: doc.title.clone(),
                url: doc.url.clone(),
                score: rec.final_score,
                title_score: rec.title_score,
                content_score: rec.content_score,
                bm25_title: rec.bm25_title,
                bm25_content: rec.bm25_content,
                doc_id: rec.doc_id,
            })
        })
        .collect();
    let total_hits = hits.len();
    let k = params.k.clamp(1, 100);
    let results = hits.into_iter().take(k).collect();

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, %policy, total_hits, "search");
    Ok(Json(SearchResponse { query: params.q, policy: policy.to_string(), took_s: elapsed.as_secs_f64(), total_hits, results }))
}

/// The title -> url mapping the command-line tool writes to disk.
pub async fn results_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<RankedResults>, ApiError> {
    let policy = parse_policy(&state.engine, params.policy.as_deref())?;
    Ok(Json(state.engine.search(&params.q, policy)))
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<String>) -> Result<Json<Document>, ApiError> {
    state
        .engine
        .snapshot()
        .document(&doc_id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, format!("document {doc_id} not found")))
}
