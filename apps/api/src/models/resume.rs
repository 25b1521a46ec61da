use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One uploaded resume and its review state.
///
/// Keyed `(owner_id, id)`; every query is owner-scoped. `feedback` is NULL
/// between upload and the scoring call, then written exactly once with either
/// the oracle's result or the fixed fallback.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    /// Object-store key of the uploaded document.
    pub resume_key: String,
    /// Object-store key of the PNG preview.
    pub preview_key: String,
    pub feedback: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
