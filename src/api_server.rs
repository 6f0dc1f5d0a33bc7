// Axum server module
//
// Purpose: serve catalogue pages as server-rendered HTML (head metadata,
// JSON-LD and FAQ accordion state resolved on the server) plus a small JSON
// API exposing each page's metadata and structured data.

#[cfg(feature = "api")]
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use moka::future::Cache;

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
use crate::config::SiteConfig;

#[cfg(feature = "api")]
use crate::error::SiteError;

#[cfg(feature = "api")]
use crate::site::faq::FAQ_QUERY_PARAM;

#[cfg(feature = "api")]
use crate::site::structured_data::to_json_ld;

#[cfg(feature = "api")]
use crate::site::SiteGenerator;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<SiteGenerator>,
    /// Rendered HTML keyed by path + open FAQ index
    pub cache: Cache<String, String>,
}

#[cfg(feature = "api")]
impl AppState {
    pub fn new(config: &SiteConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading page catalogue...");
        let catalog = config.load_catalog()?;
        tracing::info!("Loaded {} pages", catalog.len());

        Ok(Self::from_generator(SiteGenerator::new(config.identity(), catalog)))
    }

    pub fn from_generator(generator: SiteGenerator) -> Self {
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(300))
            .build();

        Self {
            generator: Arc::new(generator),
            cache,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Page data (JSON)
        .route("/api/pages", get(list_pages))
        .route("/api/pages/:slug/metadata", get(get_metadata))
        .route("/api/pages/:slug/structured-data", get(get_structured_data))

        // Everything else is a page path
        .fallback(render_page)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "pages": state.generator.catalog().len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
#[derive(serde::Deserialize)]
struct PageQuery {
    /// Open FAQ index; unparseable values mean "all collapsed"
    faq: Option<String>,
}

/// Render a catalogue page as HTML
#[cfg(feature = "api")]
async fn render_page(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let path = uri.path().to_string();
    let open_faq = params.faq.as_deref().and_then(|v| v.trim().parse::<usize>().ok());
    let cache_key = format!(
        "page:{}:{}={}",
        path,
        FAQ_QUERY_PARAM,
        open_faq.map(|i| i.to_string()).unwrap_or_default()
    );

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for {}", cache_key);
        return Ok(Html(cached));
    }

    let rendered = state.generator.render_path(&path, open_faq)?;
    state.cache.insert(cache_key, rendered.html.clone()).await;

    Ok(Html(rendered.html))
}

#[cfg(feature = "api")]
async fn list_pages(State(state): State<AppState>) -> impl IntoResponse {
    let pages: Vec<serde_json::Value> = state
        .generator
        .catalog()
        .pages()
        .iter()
        .map(|p| {
            serde_json::json!({
                "slug": p.slug,
                "path": p.path,
                "kind": p.kind,
                "title": p.title,
                "faq_count": p.faqs.len(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "rows": pages.len(),
        "data": pages
    }))
}

#[cfg(feature = "api")]
async fn get_metadata(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let page = state.generator.page_by_slug(&slug)?;
    let metadata = page.metadata()?;

    let value = serde_json::to_value(&metadata)
        .map_err(|e| AppError::Internal(format!("JSON serialization error: {}", e)))?;
    Ok(Json(value))
}

#[cfg(feature = "api")]
async fn get_structured_data(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let page = state.generator.page_by_slug(&slug)?;
    let json = to_json_ld(&page.structured_data()?)?;

    Ok(([(header::CONTENT_TYPE, "application/ld+json")], json))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    NotFound(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl From<SiteError> for AppError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::UnknownPage(path) => AppError::NotFound(format!("Page {} not found", path)),
            other => {
                tracing::error!("Render failed: {}", other);
                AppError::Internal(other.to_string())
            }
        }
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
