//! Record-store façade for resume rows.
//!
//! Every function is owner-scoped: the caller's UUID is part of the key and
//! of every WHERE clause, so one user can never read or mutate another's
//! records.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::ResumeRow;

pub async fn upsert(pool: &PgPool, row: &ResumeRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO resumes
            (id, owner_id, company_name, job_title, job_description,
             resume_key, preview_key, feedback, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (owner_id, id) DO UPDATE SET
            company_name = EXCLUDED.company_name,
            job_title = EXCLUDED.job_title,
            job_description = EXCLUDED.job_description,
            resume_key = EXCLUDED.resume_key,
            preview_key = EXCLUDED.preview_key,
            feedback = EXCLUDED.feedback
        "#,
    )
    .bind(row.id)
    .bind(row.owner_id)
    .bind(&row.company_name)
    .bind(&row.job_title)
    .bind(&row.job_description)
    .bind(&row.resume_key)
    .bind(&row.preview_key)
    .bind(&row.feedback)
    .bind(row.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE owner_id = $1 AND id = $2",
    )
    .bind(owner_id)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE owner_id = $1 ORDER BY created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Writes the feedback column once the scoring call resolves.
pub async fn set_feedback(
    pool: &PgPool,
    owner_id: Uuid,
    id: Uuid,
    feedback: &serde_json::Value,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE resumes SET feedback = $3 WHERE owner_id = $1 AND id = $2")
        .bind(owner_id)
        .bind(id)
        .bind(feedback)
        .execute(pool)
        .await?;

    Ok(())
}

/// Deletes a record; returns false when it did not exist.
pub async fn delete(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resumes WHERE owner_id = $1 AND id = $2")
        .bind(owner_id)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
