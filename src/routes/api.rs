use axum::{extract::State, Json};
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db;
use crate::error::AppError;
use crate::pipeline::{self, SearchPage};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: Option<String>,
    pub radius_miles: Option<f64>,
    pub page: Option<i64>,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchPage>, AppError> {
    let query = req.query.as_deref().unwrap_or("");
    let mut rng = rand::rngs::StdRng::from_entropy();

    let page = pipeline::run_search(
        state.pool.as_ref(),
        &state.google,
        query,
        req.radius_miles,
        req.page,
        &mut rng,
    )
    .await?;

    Ok(Json(page))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub submitter_email: Option<String>,
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<Value>, AppError> {
    let required = |field: &Option<String>| {
        field
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let (Some(name), Some(address), Some(description)) = (
        required(&req.name),
        required(&req.address),
        required(&req.description),
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let (Some(latitude), Some(longitude)) = (req.latitude, req.longitude) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(AppError::Validation("Missing required fields".to_string()));
    }

    let submission = db::create_submission(
        state.pool.as_ref(),
        &name,
        &address,
        &description,
        latitude,
        longitude,
        req.submitter_email.as_deref(),
    )
    .await?;

    tracing::info!(id = submission.id, name = %submission.name, "new place submitted");

    Ok(Json(json!({ "success": true, "submission": submission })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub place_id: Option<String>,
    pub vote: Option<String>,
}

pub async fn vote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<Value>, AppError> {
    let place_id = req.place_id.as_deref().unwrap_or("").trim();
    // One call, one step. Undo and direction changes are the client's
    // bookkeeping; the stored total is the sum of every step received.
    let delta = match req.vote.as_deref() {
        Some("up") => 1,
        Some("down") => -1,
        _ => {
            return Err(AppError::Validation(
                "Missing or invalid placeId/vote".to_string(),
            ))
        }
    };
    if place_id.is_empty() {
        return Err(AppError::Validation(
            "Missing or invalid placeId/vote".to_string(),
        ));
    }

    let votes = db::upsert_vote(state.pool.as_ref(), place_id, delta).await?;

    Ok(Json(json!({ "votes": votes })))
}
