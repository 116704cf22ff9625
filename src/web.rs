use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::handlers::{comparison, AnalysisDispatcher};
use crate::models::{AnalysisResult, ComparisonTable};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct WebState {
    pub dispatcher: Arc<AnalysisDispatcher>,
    pub default_claude_model: String,
}

/// JSON payload for one analysis round. `comparison` is `null` whenever
/// either side failed; the page then renders the per-side errors instead.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub claude: AnalysisResult,
    pub gemini: AnalysisResult,
    pub comparison: Option<ComparisonTable>,
}

/// Create the upload/analyze router
pub fn create_router(dispatcher: Arc<AnalysisDispatcher>, default_claude_model: String) -> Router {
    let state = WebState {
        dispatcher,
        default_claude_model,
    };

    Router::new()
        .route("/", get(upload_page))
        .route("/analyze", post(analyze_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Main upload page
async fn upload_page() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Accept a multipart food photo, fan it out to both providers and reply
/// with both results plus the optional comparison table.
async fn analyze_image(
    State(state): State<WebState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, StatusCode> {
    let mut upload: Option<(Vec<u8>, String)> = None;
    let mut model = state.default_claude_model.clone();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        log::error!("❌ Malformed multipart upload: {}", e);
        StatusCode::BAD_REQUEST
    })? {
        let field_name = field.name().map(|name| name.to_string());
        match field_name.as_deref() {
            Some("image") => {
                let extension = field
                    .file_name()
                    .and_then(|name| name.rsplit('.').next())
                    .unwrap_or("png")
                    .to_ascii_lowercase();
                let data = field.bytes().await.map_err(|e| {
                    log::error!("❌ Failed to read upload body: {}", e);
                    StatusCode::BAD_REQUEST
                })?;
                upload = Some((data.to_vec(), extension));
            }
            Some("model") => {
                model = field.text().await.map_err(|e| {
                    log::error!("❌ Failed to read model field: {}", e);
                    StatusCode::BAD_REQUEST
                })?;
            }
            _ => {}
        }
    }

    let (bytes, extension) = upload.ok_or(StatusCode::BAD_REQUEST)?;
    if !matches!(extension.as_str(), "png" | "jpg" | "jpeg") {
        log::warn!("⚠️ Rejecting upload with extension '{}'", extension);
        return Err(StatusCode::BAD_REQUEST);
    }

    // Both adapters read this path concurrently; it is deleted only after
    // the join below has completed, so no reader loses the file.
    let temp_path = std::env::temp_dir().join(format!("food-{}.{}", Uuid::new_v4(), extension));
    let temp_path_str = temp_path.to_string_lossy().to_string();

    tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
        log::error!("❌ Failed to write temp file {}: {}", temp_path_str, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    log::info!(
        "📸 Received upload ({} bytes), analyzing with Claude model {}",
        bytes.len(),
        model
    );

    let (claude, gemini) = state.dispatcher.run_both(&temp_path_str, &model).await;

    if let Err(e) = tokio::fs::remove_file(&temp_path).await {
        log::warn!("⚠️ Could not delete temp file {}: {}", temp_path_str, e);
    }

    let comparison = comparison::assemble(&claude, &gemini);
    log::info!(
        "✅ Analysis complete (claude_error={}, gemini_error={}, comparison={})",
        claude.is_error(),
        gemini.is_error(),
        comparison.is_some()
    );

    Ok((
        StatusCode::OK,
        Json(AnalyzeResponse {
            claude,
            gemini,
            comparison,
        }),
    ))
}
