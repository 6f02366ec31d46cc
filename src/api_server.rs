// Axum API Server Module
//
// Purpose: JSON/HTML surface over one GRI assessment (form state store,
// section renderer, completion, preview, export)

#[cfg(feature = "api")]
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
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
use serde::Deserialize;

#[cfg(feature = "api")]
use std::sync::{Arc, Mutex, PoisonError};

#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
use crate::completion::compute_completion;

#[cfg(feature = "api")]
use crate::config::ServerConfig;

#[cfg(feature = "api")]
use crate::error::StoreError;

#[cfg(feature = "api")]
use crate::form_state::{FieldPath, FieldValue};

#[cfg(feature = "api")]
use crate::frameworks::{resolve_route, storage_key, FRAMEWORKS};

#[cfg(feature = "api")]
use crate::registry::Registry;

#[cfg(feature = "api")]
use crate::renderer::{build_sidebar, render_from_store, NavigationOutcome, Navigator};

#[cfg(feature = "api")]
use crate::report::{build_preview, prepare_export, HtmlFormatter, MarkdownFormatter, EXPORT_FILE_NAME};

#[cfg(feature = "api")]
use crate::store::{spawn_persister, FileStorage, FormStore, Persister};

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub store: FormStore,
    pub navigator: Arc<Mutex<Navigator>>,
    /// Rendered export HTML keyed by state version and generation date
    pub export_cache: Cache<String, Arc<String>>,
    pub persister: Arc<Persister>,
    pub config: ServerConfig,
}

#[cfg(feature = "api")]
impl AppState {
    /// Must be called inside a tokio runtime (spawns the persister task).
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Opening file storage at {}...", config.storage_dir.display());
        let storage = Arc::new(FileStorage::new(&config.storage_dir, config.storage_quota)?);

        tracing::info!("Hydrating GRI form state...");
        let store = FormStore::open(Registry::gri(), storage, storage_key("gri"));
        tracing::info!("Hydration: {:?}", store.hydration());

        tracing::info!("Starting debounced persister ({}ms)...", config.debounce.as_millis());
        let persister = Arc::new(spawn_persister(store.clone(), config.debounce));

        tracing::info!("Initializing Moka export cache...");
        let export_cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();

        Ok(Self {
            store,
            navigator: Arc::new(Mutex::new(Navigator::new())),
            export_cache,
            persister,
            config,
        })
    }

    fn navigator(&self) -> std::sync::MutexGuard<'_, Navigator> {
        self.navigator.lock().unwrap_or_else(PoisonError::into_inner)
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

        // Framework selector
        .route("/api/frameworks", get(list_frameworks))
        .route("/api/frameworks/:slug", get(get_framework_route))

        // Form state
        .route("/api/gri/registry", get(get_registry))
        .route("/api/gri/state", get(get_state))
        .route("/api/gri/state/*path", get(get_state_at))
        .route("/api/gri/fields", put(set_field))
        .route("/api/gri/topics/:code/toggle", post(toggle_topic))
        .route("/api/gri/validate", post(validate))
        .route("/api/gri/errors", get(get_errors))
        .route("/api/gri/saved", delete(clear_saved))

        // Section renderer and navigation
        .route("/api/gri/sections/:id", get(get_section))
        .route("/api/gri/navigate", post(navigate))
        .route("/api/gri/sidebar", get(get_sidebar))
        .route("/api/gri/completion", get(get_completion))

        // Report
        .route("/api/gri/preview", get(get_preview))
        .route("/api/gri/export", get(get_export))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Request Types
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug, Deserialize)]
pub struct SetFieldRequest {
    pub path: String,
    pub value: FieldValue,
}

#[cfg(feature = "api")]
#[derive(Debug, Default, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub scope: Option<String>,
}

#[cfg(feature = "api")]
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub to: String,
}

#[cfg(feature = "api")]
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub format: Option<String>,
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn list_frameworks() -> impl IntoResponse {
    Json(FRAMEWORKS)
}

#[cfg(feature = "api")]
async fn get_framework_route(Path(slug): Path<String>) -> impl IntoResponse {
    Json(resolve_route(&slug))
}

#[cfg(feature = "api")]
async fn get_registry(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.store.registry();
    Json(serde_json::json!({
        "sections": registry.sections(),
        "groups": registry.groups(),
        "gri2Subsections": registry.gri2_subsections(),
        "disclosures": registry.disclosures(),
    }))
}

#[cfg(feature = "api")]
async fn get_state(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.get_all())
}

#[cfg(feature = "api")]
async fn get_state_at(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let path = FieldPath::parse(&path.replace('/', "."))?;
    let watch = state.store.watch(Some(path.clone()));
    watch
        .current()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No value at {}", path)))
}

#[cfg(feature = "api")]
async fn set_field(
    State(state): State<AppState>,
    Json(request): Json<SetFieldRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let path = FieldPath::parse(&request.path)?;
    let changed = state.store.set_field(&path, request.value)?;
    Ok(Json(serde_json::json!({
        "path": path,
        "changed": changed,
        "version": state.store.version(),
    })))
}

#[cfg(feature = "api")]
async fn toggle_topic(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let selected = state.store.toggle_material_topic(&code)?;
    let material_topics = state.store.with_state(|values| values.material_topics.clone());
    Ok(Json(serde_json::json!({
        "code": code,
        "selected": selected,
        "materialTopics": material_topics,
    })))
}

#[cfg(feature = "api")]
async fn validate(
    State(state): State<AppState>,
    body: Option<Json<ValidateRequest>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let scope = match body.and_then(|Json(request)| request.scope) {
        Some(raw) => Some(FieldPath::parse(&raw)?),
        None => None,
    };

    let valid = match &scope {
        Some(path) => state.store.validate(Some(path)),
        // full validation also records the "Validate All" status
        None => state.navigator().validate_all(&state.store) == crate::renderer::ValidationStatus::Valid,
    };
    let errors = match &scope {
        Some(path) => state.store.errors_under(path),
        None => state.store.errors(),
    };

    Ok(Json(serde_json::json!({
        "valid": valid,
        "status": state.navigator().status(),
        "errors": errors,
    })))
}

#[cfg(feature = "api")]
async fn get_errors(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.errors())
}

#[cfg(feature = "api")]
async fn clear_saved(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.clear_saved_data()?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(feature = "api")]
async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let view = render_from_store(&state.store, &id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown section: {}", id)))?;
    let view = serde_json::to_value(view).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(view))
}

#[cfg(feature = "api")]
async fn navigate(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<NavigationOutcome>, AppError> {
    let outcome = state
        .navigator()
        .navigate(&state.store, &request.to)
        .ok_or_else(|| AppError::NotFound(format!("Unknown section: {}", request.to)))?;
    Ok(Json(outcome))
}

#[cfg(feature = "api")]
async fn get_sidebar(State(state): State<AppState>) -> impl IntoResponse {
    let (active, status) = {
        let navigator = state.navigator();
        (navigator.active().to_string(), navigator.status())
    };
    let errors = state.store.errors();
    let sidebar = state
        .store
        .with_state(|values| build_sidebar(state.store.registry(), values, &errors, &active));
    Json(serde_json::json!({
        "sidebar": sidebar,
        "status": status,
        "statusMessage": status.message(),
    }))
}

#[cfg(feature = "api")]
async fn get_completion(State(state): State<AppState>) -> impl IntoResponse {
    let completion = state
        .store
        .with_state(|values| compute_completion(state.store.registry(), values));
    Json(completion)
}

#[cfg(feature = "api")]
async fn get_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    let preview = state
        .store
        .with_state(|values| build_preview(state.store.registry(), values));

    match query.format.as_deref() {
        None | Some("json") => Ok(Json(preview).into_response()),
        Some("markdown") | Some("md") => Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            MarkdownFormatter::format_preview(&preview),
        )
            .into_response()),
        Some(other) => Err(AppError::BadRequest(format!("Unsupported preview format: {}", other))),
    }
}

#[cfg(feature = "api")]
async fn get_export(State(state): State<AppState>) -> impl IntoResponse {
    let today = chrono::Local::now().date_naive();
    let cache_key = format!("{}:{}", state.store.version(), today);

    let html = match state.export_cache.get(&cache_key).await {
        Some(cached) => {
            tracing::debug!("Cache hit for export {}", cache_key);
            cached
        }
        None => {
            let document = prepare_export(&state.store, today);
            let html = Arc::new(HtmlFormatter::format(&document));
            state.export_cache.insert(cache_key, html.clone()).await;
            html
        }
    };

    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        html.as_str().to_string(),
    )
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownField(_) | StoreError::UnknownTopic(_) | StoreError::InvalidPath(_) => {
                AppError::BadRequest(err.to_string())
            }
            StoreError::Serialize(_) | StoreError::Storage(_) => AppError::Internal(err.to_string()),
        }
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::warn!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
