//! Axum route handlers for listing discovery.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::AppError;
use crate::jobs::criteria::FilterCriteria;
use crate::jobs::query::{fetch_job, list_jobs, JobPage};
use crate::models::job::JobRow;
use crate::state::AppState;

/// GET /api/v1/jobs
///
/// Browses listings with the optional filters `search`, `company`,
/// `location`, repeated `job_category`, repeated `salary_range`, `order_by`
/// and `page`. Raw pairs are extracted so repeated keys survive; malformed
/// values degrade instead of failing the request.
pub async fn handle_browse(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<JobPage>, AppError> {
    let criteria = FilterCriteria::from_pairs(params);
    let page = list_jobs(&state.db, &criteria).await?;
    Ok(Json(page))
}

/// GET /api/v1/jobs/:id
///
/// Returns one listing in full.
pub async fn handle_job_detail(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<JobRow>, AppError> {
    let job = fetch_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(job))
}
