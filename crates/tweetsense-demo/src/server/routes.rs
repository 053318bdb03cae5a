use crate::pages::{Page, PageRequest};
use crate::render::render_page;
use crate::state::DemoAppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tweetsense_classifiers::{ClassScore, ModelKind, ModelOutcome};
use tweetsense_core::{Error, InputWarning, LabeledExample, Sentiment};

// ============================================================================
// Errors
// ============================================================================

/// Error returned by JSON handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] Error),

    /// Malformed JSON body
    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),

    /// Malformed query string
    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(Error::UnknownModel(_)) => StatusCode::NOT_FOUND,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Json(rejection) => rejection.status(),
            ApiError::Query(rejection) => rejection.status(),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================================
// Page endpoints
// ============================================================================

/// Server-rendered page for the navigation choice in the query string
pub async fn page(
    State(state): State<DemoAppState>,
    Query(request): Query<PageRequest>,
) -> Response {
    let view = state.controller.view(&request);
    let status = if view.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    let html = render_page(&state.context.config.content, &view);
    (status, Html(html)).into_response()
}

/// The same view as [`page`], as JSON
pub async fn get_view(
    State(state): State<DemoAppState>,
    Query(request): Query<PageRequest>,
) -> Response {
    let view = state.controller.view(&request);
    let status = if view.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Json(view)).into_response()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageInfo {
    pub slug: String,
    pub title: String,
}

pub async fn list_pages() -> impl IntoResponse {
    let pages: Vec<PageInfo> = Page::ALL
        .iter()
        .map(|page| PageInfo {
            slug: page.slug().to_string(),
            title: page.title().to_string(),
        })
        .collect();
    Json(pages)
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}

// ============================================================================
// Model endpoints
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: ModelKind,
    pub classes: Vec<i64>,
    pub n_features: usize,
}

pub async fn list_models(State(state): State<DemoAppState>) -> impl IntoResponse {
    let models: Vec<ModelInfo> = state
        .context
        .registry()
        .models()
        .iter()
        .map(|model| ModelInfo {
            id: model.spec.id.clone(),
            title: model.spec.title.clone(),
            description: model.spec.description.clone(),
            kind: model.classifier.kind(),
            classes: model.classifier.classes().to_vec(),
            n_features: model.classifier.n_features(),
        })
        .collect();
    Json(models)
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
    /// Restrict to one model; all models when absent
    pub model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<WarningBody>,
    pub results: Vec<ModelResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WarningBody {
    pub kind: InputWarning,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelResult {
    pub model: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<ClassScore>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub latency_us: u64,
}

impl From<ModelOutcome> for ModelResult {
    fn from(outcome: ModelOutcome) -> Self {
        let mut result = Self {
            model: outcome.model_id,
            title: outcome.title,
            label: None,
            display_text: None,
            scores: None,
            error: None,
            latency_us: outcome.latency_us,
        };
        match outcome.result {
            Ok(prediction) => {
                result.label = Some(prediction.result.label);
                result.display_text = Some(prediction.result.display_text);
                result.scores = Some(prediction.scores);
            }
            Err(e) => result.error = Some(e.to_string()),
        }
        result
    }
}

pub async fn predict(
    State(state): State<DemoAppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(req) = payload?;
    let run = state.context.pipeline.predict_selected(
        &req.text,
        &state.context.config.placeholder,
        req.model.as_deref(),
    )?;

    Ok(Json(PredictResponse {
        text: run.text,
        warning: run.warning.map(|kind| WarningBody {
            kind,
            message: kind.message().to_string(),
        }),
        results: run.outcomes.into_iter().map(ModelResult::from).collect(),
    }))
}

// ============================================================================
// Dataset endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DatasetQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: Sentiment,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetResponse {
    pub total: usize,
    pub counts: Vec<LabelCount>,
    pub rows: Vec<LabeledExample>,
}

pub async fn get_dataset(
    State(state): State<DemoAppState>,
    query: Result<Query<DatasetQuery>, QueryRejection>,
) -> Result<Json<DatasetResponse>, ApiError> {
    let Query(query) = query?;
    let dataset = &state.context.dataset;
    let limit = query.limit.unwrap_or(state.context.config.max_raw_rows);

    let counts = dataset
        .label_counts()
        .into_iter()
        .map(|(label, count)| LabelCount {
            label,
            name: label.name().to_string(),
            count,
        })
        .collect();

    Ok(Json(DatasetResponse {
        total: dataset.len(),
        counts,
        rows: dataset.head(limit).to_vec(),
    }))
}
