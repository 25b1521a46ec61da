use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::convert::DocumentConverter;
use crate::llm_client::LlmClient;
use crate::resumes::scoring::ResumeScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub llm: LlmClient,
    /// ATS scorer used by the upload flow. Production wires the LLM client.
    pub scorer: Arc<dyn ResumeScorer>,
    pub config: Config,
    /// Upload-to-preview converter with its page decoder and glyph
    /// rasterizer wired in at startup.
    pub converter: Arc<DocumentConverter>,
}
