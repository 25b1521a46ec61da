//! Pluggable seam over the ATS scoring oracle.
//!
//! `AppState` carries an `Arc<dyn ResumeScorer>`; the production backend
//! delegates to the LLM client. Swapping the backend (or faking it in tests)
//! never touches the upload handler.

use async_trait::async_trait;

use crate::llm_client::{JobContext, LlmClient, LlmError};
use crate::models::feedback::Feedback;

#[async_trait]
pub trait ResumeScorer: Send + Sync {
    async fn score(&self, resume_text: &str, job: &JobContext) -> Result<Feedback, LlmError>;
}

#[async_trait]
impl ResumeScorer for LlmClient {
    async fn score(&self, resume_text: &str, job: &JobContext) -> Result<Feedback, LlmError> {
        self.score_resume(resume_text, job).await
    }
}
