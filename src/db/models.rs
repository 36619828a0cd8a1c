use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct VoteRecord {
    pub id: i32,
    pub place_id: String,
    pub name: String,
    pub votes: i32,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSubmission {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub submitter_email: Option<String>,
    pub approved: bool,
    pub submitted_at: DateTime<Utc>,
}
