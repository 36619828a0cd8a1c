use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db;
use crate::error::AppError;
use crate::state::AppState;

/// Proof that the caller is an allow-listed moderator. Sign-in happens at
/// the fronting identity provider; this extractor only trusts the
/// identity it asserted and checks it against the configured list.
pub struct AdminUser {
    pub email: String,
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get("x-auth-email")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthorized)?;

        if !state.config.is_admin(&email) {
            return Err(AppError::Forbidden);
        }

        Ok(AdminUser { email })
    }
}

pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
) -> Result<Json<Value>, AppError> {
    tracing::debug!(admin = %admin.email, "listing pending submissions");

    let submissions = db::list_pending_submissions(state.pool.as_ref()).await?;

    Ok(Json(json!({ "submissions": submissions })))
}

#[derive(Deserialize)]
pub struct ApproveRequest {
    pub id: Option<i32>,
    pub approve: Option<bool>,
}

pub async fn approve_submission(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(id), Some(approve)) = (req.id, req.approve) else {
        return Err(AppError::Validation(
            "Missing or invalid id/approve".to_string(),
        ));
    };

    let updated = db::set_submission_approval(state.pool.as_ref(), id, approve)
        .await?
        .ok_or(AppError::NotFound("submission"))?;

    tracing::info!(admin = %admin.email, id, approve, "submission moderated");

    Ok(Json(json!({ "success": true, "updated": updated })))
}
