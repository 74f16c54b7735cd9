//! HTTP API for Dream Catcher
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /dreams - Gallery (query: q, tags, categories, viewer)
//! - POST /dreams - Record a dream
//! - GET /dreams/:id - Get one dream
//! - PATCH /dreams/:id - Update a dream
//! - GET /tags - Tags used by public dreams
//! - GET /users/:id/analysis - Pattern analysis of one dreamer
//! - GET /community/insights - Community insights

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use crate::core::{gallery, journal, AnalysisCache, CommunityAggregator, DreamRepository};
use crate::types::{
    CommunityInsights, DreamAnalysis, DreamCategory, DreamDraft, DreamEntry, EntryPatch,
    GalleryFilter,
};
use crate::Error;

/// App state
pub struct AppState {
    pub repo: RwLock<Box<dyn DreamRepository>>,
    pub cache: Mutex<AnalysisCache>,
    pub community: CommunityAggregator,
}

/// Gallery query string
#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    pub q: Option<String>,
    /// Comma-separated, all required
    pub tags: Option<String>,
    /// Comma-separated category names, any matches
    pub categories: Option<String>,
    pub viewer: Option<String>,
}

/// Gallery response
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub total: usize,
    pub dreams: Vec<DreamEntry>,
}

/// Tag vocabulary response
#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

/// Per-dreamer dashboard response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalysisResponse {
    pub user_id: String,
    pub total_dreams: usize,
    pub public_dreams: usize,
    pub analysis: DreamAnalysis,
}

/// Health response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub dreams_stored: usize,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Error carried out of a handler
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::Rejected(reason) => {
                ApiError::new(StatusCode::BAD_REQUEST, reason.code(), reason.description())
            }
            Error::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
            Error::DuplicateId(_) => ApiError::new(StatusCode::CONFLICT, "DUPLICATE_ID", err.to_string()),
            _ => {
                tracing::error!(error = %err, "request failed");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Create the API router over a repository
pub fn create_router(repo: Box<dyn DreamRepository>) -> Router {
    let state = Arc::new(AppState {
        repo: RwLock::new(repo),
        cache: Mutex::new(AnalysisCache::new()),
        community: CommunityAggregator::new(),
    });

    Router::new()
        .route("/health", get(health))
        .route("/dreams", get(list_dreams).post(create_dream))
        .route("/dreams/:id", get(get_dream).patch(update_dream))
        .route("/tags", get(list_tags))
        .route("/users/:id/analysis", get(user_analysis))
        .route("/community/insights", get(community_insights))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    let repo = state.repo.read().await;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        dreams_stored: repo.len()?,
    }))
}

/// Gallery listing
async fn list_dreams(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GalleryQuery>,
) -> ApiResult<Json<GalleryResponse>> {
    let filter = gallery_filter(query)?;
    let entries = state.repo.read().await.list()?;

    let dreams: Vec<DreamEntry> = gallery::filter_entries(&entries, &filter)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(GalleryResponse {
        total: dreams.len(),
        dreams,
    }))
}

/// Record a new dream
async fn create_dream(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<DreamDraft>,
) -> ApiResult<(StatusCode, Json<DreamEntry>)> {
    let entry = journal::record(draft, Utc::now()).map_err(Error::from)?;
    let created = state.repo.write().await.create(entry)?;
    tracing::info!(id = %created.id, tags = created.tags.len(), emotions = created.emotions.len(), "dream recorded");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get one dream
async fn get_dream(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DreamEntry>> {
    let repo = state.repo.read().await;
    let entry = repo.get(&id)?.ok_or(Error::NotFound(id))?;
    Ok(Json(entry))
}

/// Update a dream
async fn update_dream(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<EntryPatch>,
) -> ApiResult<Json<DreamEntry>> {
    let mut repo = state.repo.write().await;
    let current = repo.get(&id)?.ok_or(Error::NotFound(id))?;
    let updated = journal::apply_patch(&current, patch).map_err(Error::from)?;
    let updated = repo.update(updated)?;
    tracing::info!(id = %updated.id, "dream updated");
    Ok(Json(updated))
}

/// Tags of public dreams
async fn list_tags(State(state): State<Arc<AppState>>) -> ApiResult<Json<TagsResponse>> {
    let entries = state.repo.read().await.list()?;
    let tags = gallery::all_tags(entries.iter().filter(|e| e.is_public));
    Ok(Json(TagsResponse { tags }))
}

/// Analysis of everything one dreamer recorded, private dreams included
async fn user_analysis(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserAnalysisResponse>> {
    let dreams = state.repo.read().await.list_owned(&user_id)?;
    let analysis = state.cache.lock().await.get_or_analyze(&dreams);

    Ok(Json(UserAnalysisResponse {
        total_dreams: dreams.len(),
        public_dreams: dreams.iter().filter(|d| d.is_public).count(),
        user_id,
        analysis,
    }))
}

/// Community insights over opted-in dreamers
async fn community_insights(State(state): State<Arc<AppState>>) -> ApiResult<Json<CommunityInsights>> {
    let entries = state.repo.read().await.list()?;
    Ok(Json(state.community.aggregate(&entries)))
}

fn gallery_filter(query: GalleryQuery) -> ApiResult<GalleryFilter> {
    let categories = split_list(query.categories.as_deref())
        .into_iter()
        .map(|name| {
            DreamCategory::parse(&name).ok_or_else(|| {
                ApiError::new(
                    StatusCode::BAD_REQUEST,
                    "UNKNOWN_CATEGORY",
                    format!("Unknown category: {}", name),
                )
            })
        })
        .collect::<ApiResult<Vec<_>>>()?;

    Ok(GalleryFilter {
        search: query.q,
        tags: split_list(query.tags.as_deref()),
        categories,
        viewer: query.viewer.filter(|v| !v.trim().is_empty()),
    })
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Run the API server
pub async fn run_server(addr: &str, repo: Box<dyn DreamRepository>) -> std::io::Result<()> {
    let router = create_router(repo);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Dream Catcher API listening");
    axum::serve(listener, router).await
}
