//! POST /api/v1/render — the document-to-PDF endpoint.
//!
//! Accepts either a structured resume document or a pre-rendered HTML+CSS
//! snapshot of the live preview; exactly one form per request. An optional
//! `capture` bitmap rides along as the raster fallback input. The response is
//! the PDF itself; all failures convert to the structured JSON error shape at
//! this boundary.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::markup;
use crate::models::resume::ResumeDocument;
use crate::models::{locale, theme};
use crate::raster;
use crate::render::{self, RenderJob};
use crate::state::AppState;

const DEFAULT_FILENAME: &str = "resume.pdf";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub resume_document: Option<ResumeDocument>,
    pub theme: Option<String>,
    pub language: Option<String>,
    pub html: Option<String>,
    pub css: Option<String>,
    /// Bitmap snapshot of the live preview, base64 or data-URL encoded.
    pub capture: Option<String>,
    pub filename: Option<String>,
}

/// POST /api/v1/render
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<(HeaderMap, Bytes), AppError> {
    let job = prepare_job(req)?;
    let artifact = render::render_pdf(&state.browser, job).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(|e| AppError::Internal(e.into()))?,
    );

    Ok((headers, artifact.bytes))
}

/// Validates the request shape and synthesizes the HTML document to render.
fn prepare_job(req: RenderRequest) -> Result<RenderJob, AppError> {
    let html = match (&req.html, &req.resume_document) {
        (None, None) => return Err(AppError::MissingContent),
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "Provide either a structured document or an HTML snapshot, not both".to_string(),
            ))
        }
        (Some(snapshot), None) => {
            markup::wrap_document(snapshot, req.css.as_deref().unwrap_or(""))
        }
        (None, Some(doc)) => markup::synthesize(
            doc,
            req.theme.as_deref().unwrap_or(theme::DEFAULT_THEME_KEY),
            req.language.as_deref().unwrap_or(locale::DEFAULT_LANGUAGE),
        ),
    };

    // A broken capture only costs the fallback, not the whole request.
    let capture = req.capture.as_deref().and_then(|payload| {
        raster::decode_capture(payload)
            .map_err(|e| warn!(error = %e, "discarding undecodable capture payload"))
            .ok()
    });

    Ok(RenderJob {
        html,
        capture,
        filename: suggested_filename(req.filename.as_deref(), req.resume_document.as_ref()),
    })
}

/// Derives the download filename: the caller's explicit choice, else
/// `<Name>_Resume.pdf` from the document's name with whitespace collapsed to
/// underscores, else the fixed default.
fn suggested_filename(explicit: Option<&str>, doc: Option<&ResumeDocument>) -> String {
    if let Some(name) = explicit {
        let sanitized: String = name
            .chars()
            .filter(|c| !c.is_control() && *c != '"')
            .collect();
        let sanitized = sanitized.trim();
        if !sanitized.is_empty() {
            return sanitized.to_string();
        }
    }

    if let Some(doc) = doc {
        let name = doc.personal_info.name.trim();
        if !name.is_empty() {
            let underscored: Vec<&str> = name.split_whitespace().collect();
            return format!("{}_Resume.pdf", underscored.join("_"));
        }
    }

    DEFAULT_FILENAME.to_string()
}
