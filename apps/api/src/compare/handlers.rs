//! Axum route handlers for CV-to-job comparison.

use std::path::Path as FsPath;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::compare::assessment::Breakdown;
use crate::compare::orchestrator::{compare_cv_to_job, ComparisonRequest};
use crate::errors::AppError;
use crate::jobs::query::fetch_job;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub job_id: i64,
    /// The model's assessment verbatim.
    pub assessment: String,
    /// Structured view of the assessment when its shape could be parsed.
    pub breakdown: Option<Breakdown>,
}

/// POST /api/v1/jobs/:id/compare
///
/// Multipart form: a `cv` file part (`.txt`, `.pdf` or `.docx`) and a
/// `user_id` text part. Authentication is handled upstream; the user id
/// identifies the upload's staging slot.
pub async fn handle_compare(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<CompareResponse>, AppError> {
    let job = fetch_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let mut cv: Option<(String, Bytes)> = None;
    let mut user_id: Option<i64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("cv") => {
                let filename = field
                    .file_name()
                    .map(sanitize_filename)
                    .filter(|f| !f.is_empty())
                    .ok_or_else(|| {
                        AppError::Validation("cv part must carry a filename".to_string())
                    })?;
                let contents = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read cv upload: {e}")))?;
                cv = Some((filename, contents));
            }
            Some("user_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read user_id: {e}")))?;
                user_id = Some(text.trim().parse().map_err(|_| {
                    AppError::Validation("user_id must be an integer".to_string())
                })?);
            }
            _ => {} // unknown parts are ignored
        }
    }

    let (filename, contents) =
        cv.ok_or_else(|| AppError::Validation("Missing cv file part".to_string()))?;
    let user_id =
        user_id.ok_or_else(|| AppError::Validation("Missing user_id part".to_string()))?;

    let assessment = compare_cv_to_job(
        &state.inference,
        &state.config.cv_upload_dir,
        ComparisonRequest {
            user_id,
            filename,
            contents,
            job_description: Some(job.full_description),
        },
    )
    .await?;

    Ok(Json(CompareResponse {
        job_id,
        assessment: assessment.text,
        breakdown: assessment.breakdown,
    }))
}

/// Reduces a client-supplied filename to its final path component so the
/// staged path cannot escape the upload directory.
fn sanitize_filename(raw: &str) -> String {
    FsPath::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directory_components() {
        assert_eq!(sanitize_filename("../../etc/passwd.txt"), "passwd.txt");
        assert_eq!(sanitize_filename("/tmp/resume.pdf"), "resume.pdf");
        assert_eq!(sanitize_filename("resume.docx"), "resume.docx");
    }

    #[test]
    fn test_sanitize_preserves_the_suffix_casing() {
        // Dispatch downstream is case-sensitive; sanitizing must not
        // normalize what it passes along.
        assert_eq!(sanitize_filename("dir/Resume.TXT"), "Resume.TXT");
    }

    #[test]
    fn test_sanitize_of_bare_directories_is_empty() {
        assert_eq!(sanitize_filename("/"), "");
        assert_eq!(sanitize_filename(""), "");
    }
}
