//! Match orchestration — stages the uploaded CV, runs
//! extract → build-prompt → invoke-inference, and cleans up the staged
//! file regardless of outcome.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;
use tracing::warn;

use crate::compare::assessment::Assessment;
use crate::compare::extract::{self, ExtractError};
use crate::compare::prompt::build_compare_prompt;
use crate::inference::{InferenceClient, InferenceError};

/// One comparison request. The uploaded bytes are staged to disk for the
/// duration of the pipeline and deleted afterwards.
#[derive(Debug)]
pub struct ComparisonRequest {
    pub user_id: i64,
    /// Original filename; drives format dispatch.
    pub filename: String,
    pub contents: Bytes,
    pub job_description: Option<String>,
}

/// Pipeline failure, classified by stage. Each kind chains its cause so
/// operators can tell a corrupt upload from a network failure.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("could not stage uploaded file: {0}")]
    Staging(#[source] std::io::Error),

    #[error("document extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("inference request failed: {0}")]
    Inference(#[from] InferenceError),
}

/// Runs the comparison pipeline for one request.
///
/// The staged path is keyed by (user id, original filename); two
/// concurrent uploads of the same filename by one user race on it.
pub async fn compare_cv_to_job(
    inference: &InferenceClient,
    upload_dir: &Path,
    request: ComparisonRequest,
) -> Result<Assessment, CompareError> {
    let staged = staged_path(upload_dir, request.user_id, &request.filename);
    tokio::fs::write(&staged, &request.contents)
        .await
        .map_err(CompareError::Staging)?;

    let result = run_pipeline(inference, &staged, request.job_description.as_deref()).await;

    // Best-effort cleanup: never escalated, only logged.
    if let Err(e) = tokio::fs::remove_file(&staged).await {
        warn!("failed to remove staged CV {}: {e}", staged.display());
    }

    result
}

async fn run_pipeline(
    inference: &InferenceClient,
    staged: &Path,
    job_description: Option<&str>,
) -> Result<Assessment, CompareError> {
    let cv_text = extract::extract_text(staged)?;
    let prompt = build_compare_prompt(&cv_text, job_description);
    let response = inference.chat(&prompt).await?;
    Ok(Assessment::from_response(response))
}

fn staged_path(upload_dir: &Path, user_id: i64, filename: &str) -> PathBuf {
    upload_dir.join(format!("{user_id}_{filename}"))
}
