//! Axum route handlers for the Recommendation API.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::recommendation::RecommendationRow;
use crate::recommendation::store;
use crate::state::AppState;

/// GET /api/v1/recommendations/user/:user_id
///
/// Every recommendation generated for the user. A user with no
/// recommendations gets an empty list, not an error.
pub async fn handle_get_user_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<RecommendationRow>>, AppError> {
    let recommendations = store::find_by_user_id(&state.db, user_id).await?;
    Ok(Json(recommendations))
}

/// GET /api/v1/recommendations/activity/:activity_id
///
/// The recommendation for a specific activity. Unlike generation, a lookup
/// for an unknown activity is a genuine 404 — there is nothing sensible to
/// fall back to.
pub async fn handle_get_activity_recommendation(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
) -> Result<Json<RecommendationRow>, AppError> {
    store::find_by_activity_id(&state.db, activity_id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!("No recommendation found for activity {activity_id}"))
        })
}
