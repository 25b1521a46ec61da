//! HTTP handlers for the resume-review flow.

use anyhow::anyhow;
use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::convert::{self, PreviewImage, SourceFormat};
use crate::errors::AppError;
use crate::llm_client::JobContext;
use crate::models::feedback::Feedback;
use crate::models::resume::ResumeRow;
use crate::rebuild::rebuild_resume_pdf;
use crate::state::AppState;
use crate::storage;

use super::scoring::ResumeScorer;
use super::store;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub resume_location: String,
    pub preview_location: String,
    pub feedback: Feedback,
}

struct UploadForm {
    file_name: String,
    content_type: String,
    bytes: Bytes,
    job: JobContext,
}

/// POST /api/v1/resumes
///
/// Converts the upload to a preview, stores both objects, records the resume
/// with NULL feedback, then scores it. A failed oracle call persists the
/// fixed fallback feedback so the record never stays pending.
pub async fn handle_upload(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let id = Uuid::new_v4();

    // Sniff before any decoding; unsupported uploads stop here.
    let format = convert::sniff(&form.content_type, &form.file_name)?;
    let preview = render_preview_blocking(&state, format, &form).await?;

    info!(
        "Converted {} ({}x{} preview) for owner {owner_id}",
        form.file_name, preview.width, preview.height
    );

    let resume_key = format!("resumes/{owner_id}/{id}/{}", form.file_name);
    let preview_key = format!("resumes/{owner_id}/{id}/{}", preview.file_name);
    let bucket = &state.config.s3_bucket;

    let upload_content_type = if form.content_type.is_empty() {
        "application/octet-stream"
    } else {
        &form.content_type
    };
    storage::put_object(
        &state.s3,
        bucket,
        &resume_key,
        form.bytes.to_vec(),
        upload_content_type,
    )
    .await?;
    storage::put_object(&state.s3, bucket, &preview_key, preview.png, "image/png").await?;

    let row = ResumeRow {
        id,
        owner_id,
        company_name: form.job.company_name.clone(),
        job_title: form.job.job_title.clone(),
        job_description: form.job.job_description.clone(),
        resume_key: resume_key.clone(),
        preview_key: preview_key.clone(),
        feedback: None,
        created_at: Utc::now(),
    };
    store::upsert(&state.db, &row).await?;

    let feedback = score_or_fallback(state.scorer.as_ref(), id, format, &form).await;
    let feedback_json =
        serde_json::to_value(&feedback).map_err(|e| AppError::Internal(e.into()))?;
    store::set_feedback(&state.db, owner_id, id, &feedback_json).await?;

    Ok(Json(UploadResponse {
        id,
        resume_location: storage::object_uri(bucket, &resume_key),
        preview_location: storage::object_uri(bucket, &preview_key),
        feedback,
    }))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let rows = store::list(&state.db, owner_id).await?;
    Ok(Json(rows))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let row = store::get(&state.db, owner_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("resume {id}")))?;
    Ok(Json(row))
}

/// DELETE /api/v1/resumes/:id
///
/// Removes the record and both stored objects. Object deletions are logged
/// but not fatal; the record is gone either way.
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let row = store::get(&state.db, owner_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("resume {id}")))?;

    let deleted = store::delete(&state.db, owner_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("resume {id}")));
    }

    let bucket = &state.config.s3_bucket;
    for key in [&row.resume_key, &row.preview_key] {
        if let Err(e) = storage::delete_object(&state.s3, bucket, key).await {
            warn!("Failed to delete stored object {key}: {e}");
        }
    }

    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// POST /api/v1/resumes/:id/optimize
///
/// Downloads the original document, asks the oracle for a rewrite, and
/// returns the reconstructed styled PDF as an attachment.
pub async fn handle_optimize(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let row = store::get(&state.db, owner_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("resume {id}")))?;

    let original_name = row
        .resume_key
        .rsplit('/')
        .next()
        .unwrap_or("resume.pdf")
        .to_string();

    let bytes = storage::get_object(&state.s3, &state.config.s3_bucket, &row.resume_key).await?;

    // The stored key keeps the original extension, which is enough to
    // re-select the extraction strategy.
    let format = convert::sniff("", &original_name)?;
    let text = {
        let name = original_name.clone();
        tokio::task::spawn_blocking(move || convert::extract_resume_text(format, &bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow!("text extraction for {name} panicked: {e}")))??
    };

    let job = JobContext {
        company_name: row.company_name.clone(),
        job_title: row.job_title.clone(),
        job_description: row.job_description.clone(),
    };
    let previous_feedback = row.feedback.as_ref().map(|f| f.to_string());
    let rewritten = state
        .llm
        .rewrite_resume(&text, &job, previous_feedback.as_deref())
        .await?;

    let rebuilt = tokio::task::spawn_blocking(move || {
        rebuild_resume_pdf(&rewritten, &original_name)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("pdf reconstruction panicked: {e}")))?;

    info!(
        "Rebuilt {} ({} bytes) for owner {owner_id}",
        rebuilt.file_name,
        rebuilt.pdf.len()
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", rebuilt.file_name),
        ),
    ];
    Ok((headers, rebuilt.pdf).into_response())
}

// ── helpers ──────────────────────────────────────────────────────────────

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, String, Bytes)> = None;
    let mut company_name = String::new();
    let mut job_title = String::new();
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some((file_name, content_type, bytes));
            }
            "company_name" => company_name = read_text_field(field).await?,
            "job_title" => job_title = read_text_field(field).await?,
            "job_description" => job_description = read_text_field(field).await?,
            _ => {}
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    Ok(UploadForm {
        file_name,
        content_type,
        bytes,
        job: JobContext {
            company_name: default_if_empty(company_name, "Not specified"),
            job_title: default_if_empty(job_title, "General position"),
            job_description: default_if_empty(job_description, "General resume review"),
        },
    })
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form field: {e}")))
}

fn default_if_empty(value: String, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

async fn render_preview_blocking(
    state: &AppState,
    format: SourceFormat,
    form: &UploadForm,
) -> Result<PreviewImage, AppError> {
    let converter = state.converter.clone();
    let file_name = form.file_name.clone();
    let bytes = form.bytes.clone();

    let preview = tokio::task::spawn_blocking(move || {
        converter.render_preview(format, &file_name, &bytes)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("conversion task panicked: {e}")))??;

    Ok(preview)
}

/// Extracts text and asks the oracle for a score. Every failure on this path
/// degrades to the fixed fallback; the upload itself already succeeded.
async fn score_or_fallback(
    scorer: &dyn ResumeScorer,
    id: Uuid,
    format: SourceFormat,
    form: &UploadForm,
) -> Feedback {
    let bytes = form.bytes.clone();
    let extracted =
        tokio::task::spawn_blocking(move || convert::extract_resume_text(format, &bytes)).await;

    let text = match extracted {
        Ok(Ok(text)) if !text.trim().is_empty() => text,
        Ok(Ok(_)) => {
            warn!("Resume {id} has no extractable text; storing fallback feedback");
            return Feedback::fallback();
        }
        Ok(Err(e)) => {
            warn!("Text extraction failed for resume {id}: {e}; storing fallback feedback");
            return Feedback::fallback();
        }
        Err(e) => {
            warn!("Text extraction task panicked for resume {id}: {e}");
            return Feedback::fallback();
        }
    };

    match scorer.score(&text, &form.job).await {
        Ok(feedback) => feedback,
        Err(e) => {
            warn!("Scoring failed for resume {id}: {e}; storing fallback feedback");
            Feedback::fallback()
        }
    }
}
