mod models;

pub use models::*;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::pipeline::BoundingBox;

pub type DbPool = Arc<PgPool>;

// Row cap for the bounding-box submission lookup.
const MAX_SUBMISSION_ROWS: i64 = 50;

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(Arc::new(pool))
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Atomic increment; concurrent voters on the same id cannot lose updates.
/// First vote creates the row with a value of +1 or -1.
pub async fn upsert_vote(pool: &PgPool, place_id: &str, delta: i32) -> Result<i32, sqlx::Error> {
    // Votes arrive without a display name; the id doubles as one.
    let (votes,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO place_votes (place_id, name, votes)
        VALUES ($1, $1, $2)
        ON CONFLICT (place_id)
        DO UPDATE SET votes = place_votes.votes + EXCLUDED.votes
        RETURNING votes
        "#,
    )
    .bind(place_id)
    .bind(delta)
    .fetch_one(pool)
    .await?;

    Ok(votes)
}

/// Batch vote lookup. Ids with no record are simply absent from the map;
/// callers treat them as zero.
pub async fn get_votes(
    pool: &PgPool,
    place_ids: &[String],
) -> Result<HashMap<String, i32>, sqlx::Error> {
    if place_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, VoteRecord>(
        "SELECT * FROM place_votes WHERE place_id = ANY($1)",
    )
    .bind(place_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| (r.place_id, r.votes)).collect())
}

pub async fn create_submission(
    pool: &PgPool,
    name: &str,
    address: &str,
    description: &str,
    latitude: f64,
    longitude: f64,
    submitter_email: Option<&str>,
) -> Result<UserSubmission, sqlx::Error> {
    sqlx::query_as::<_, UserSubmission>(
        r#"
        INSERT INTO user_submissions (name, address, description, latitude, longitude, submitter_email)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(address)
    .bind(description)
    .bind(latitude)
    .bind(longitude)
    .bind(submitter_email)
    .fetch_one(pool)
    .await
}

pub async fn list_pending_submissions(pool: &PgPool) -> Result<Vec<UserSubmission>, sqlx::Error> {
    sqlx::query_as::<_, UserSubmission>(
        "SELECT * FROM user_submissions WHERE approved = false ORDER BY submitted_at DESC",
    )
    .fetch_all(pool)
    .await
}

/// Flips the approval flag. Returns `None` when no row has that id.
/// Idempotent; re-approving an approved submission is a no-op.
pub async fn set_submission_approval(
    pool: &PgPool,
    id: i32,
    approve: bool,
) -> Result<Option<UserSubmission>, sqlx::Error> {
    sqlx::query_as::<_, UserSubmission>(
        "UPDATE user_submissions SET approved = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(approve)
    .fetch_optional(pool)
    .await
}

pub async fn approved_submissions_in_box(
    pool: &PgPool,
    bbox: &BoundingBox,
) -> Result<Vec<UserSubmission>, sqlx::Error> {
    sqlx::query_as::<_, UserSubmission>(
        r#"
        SELECT * FROM user_submissions
        WHERE approved = true
          AND latitude BETWEEN $1 AND $2
          AND longitude BETWEEN $3 AND $4
        LIMIT $5
        "#,
    )
    .bind(bbox.lat_min)
    .bind(bbox.lat_max)
    .bind(bbox.lng_min)
    .bind(bbox.lng_max)
    .bind(MAX_SUBMISSION_ROWS)
    .fetch_all(pool)
    .await
}
