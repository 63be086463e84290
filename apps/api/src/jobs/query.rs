//! Listing query composition — turns browse criteria into one paginated,
//! deterministically ordered page of listings plus the total match count.
//!
//! Criteria combine conjunctively; within the free-text search and within
//! the selected salary bands the clauses OR together. Expired listings are
//! not filtered out; they remain browsable.

use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::jobs::criteria::FilterCriteria;
use crate::models::job::JobRow;

pub const PAGE_SIZE: i64 = 10;

const LISTING_COLUMNS: &str = "id, title, company, location, category, salary, \
     date_posted, date_expire, short_description, full_description, user_id";

/// One page of browse results.
#[derive(Debug, Serialize)]
pub struct JobPage {
    pub jobs: Vec<JobRow>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Runs the composed query and returns one page plus the total count.
/// Pages below 1 or past the end produce an empty page with the correct
/// total; they never error.
pub async fn list_jobs(pool: &PgPool, criteria: &FilterCriteria) -> Result<JobPage, sqlx::Error> {
    let total: i64 = build_count_query(criteria)
        .build_query_scalar()
        .fetch_one(pool)
        .await?;

    let jobs = if criteria.page < 1 {
        Vec::new()
    } else {
        build_listing_query(criteria)
            .build_query_as::<JobRow>()
            .fetch_all(pool)
            .await?
    };

    Ok(JobPage {
        jobs,
        total,
        page: criteria.page,
        per_page: PAGE_SIZE,
        total_pages: (total + PAGE_SIZE - 1) / PAGE_SIZE,
    })
}

/// Fetches a single listing by id.
pub async fn fetch_job(pool: &PgPool, job_id: i64) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(&format!(
        "SELECT {LISTING_COLUMNS} FROM jobs WHERE id = $1"
    ))
    .bind(job_id)
    .fetch_optional(pool)
    .await
}

fn build_listing_query(criteria: &FilterCriteria) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {LISTING_COLUMNS} FROM jobs WHERE TRUE"));
    push_filters(&mut qb, criteria);

    qb.push(" ORDER BY ").push(criteria.order.sql());

    let offset = (criteria.page.max(1) - 1) * PAGE_SIZE;
    qb.push(" LIMIT ").push_bind(PAGE_SIZE);
    qb.push(" OFFSET ").push_bind(offset);
    qb
}

fn build_count_query(criteria: &FilterCriteria) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM jobs WHERE TRUE");
    push_filters(&mut qb, criteria);
    qb
}

/// Appends one AND clause per active criterion. Unset criteria contribute
/// no restriction.
fn push_filters(qb: &mut QueryBuilder<'static, Postgres>, criteria: &FilterCriteria) {
    if let Some(search) = &criteria.search {
        // Substring match across all four text fields, OR'd together.
        let pattern = format!("%{search}%");
        qb.push(" AND (title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR company ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR short_description ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR full_description ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    if let Some(company) = &criteria.company {
        qb.push(" AND company = ");
        qb.push_bind(company.clone());
    }

    if let Some(location) = &criteria.location {
        qb.push(" AND location ILIKE ");
        qb.push_bind(format!("%{location}%"));
    }

    if !criteria.categories.is_empty() {
        let names: Vec<String> = criteria
            .categories
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();
        qb.push(" AND category = ANY(");
        qb.push_bind(names);
        qb.push(")");
    }

    if !criteria.salary_bands.is_empty() {
        // A NULL salary never satisfies a range comparison, so any active
        // band filter excludes unpriced listings.
        qb.push(" AND (");
        for (i, band) in criteria.salary_bands.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            let (min, max) = band.bounds();
            qb.push("(");
            if let Some(min) = min {
                qb.push("salary > ");
                qb.push_bind(min);
                if max.is_some() {
                    qb.push(" AND ");
                }
            }
            if let Some(max) = max {
                qb.push("salary <= ");
                qb.push_bind(max);
            }
            qb.push(")");
        }
        qb.push(")");
    }
}
