use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A job listing as stored in the `jobs` table.
/// This core only reads listings; creation and mutation belong to the CRUD layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: String,
    pub salary: Option<i64>,
    pub date_posted: NaiveDate,
    pub date_expire: NaiveDate,
    pub short_description: String,
    pub full_description: String,
    pub user_id: i64,
}
