//! Axum route handlers for the Activity API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::activity::store;
use crate::errors::AppError;
use crate::models::activity::ActivityRow;
use crate::recommendation;
use crate::recommendation::generator::generate_recommendation;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TrackActivityRequest {
    pub user_id: Uuid,
    pub activity_type: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    #[serde(default = "empty_metrics")]
    pub additional_metrics: Value,
}

fn empty_metrics() -> Value {
    serde_json::json!({})
}

/// POST /api/v1/activities
///
/// Tracks an activity and returns the stored row. Coaching feedback for the
/// new activity is generated on a spawned task, off the request path — the
/// tracking response never waits on the AI provider.
pub async fn handle_track_activity(
    State(state): State<AppState>,
    Json(request): Json<TrackActivityRequest>,
) -> Result<Json<ActivityRow>, AppError> {
    if request.activity_type.trim().is_empty() {
        return Err(AppError::Validation(
            "activity_type cannot be empty".to_string(),
        ));
    }
    if request.duration_minutes < 0 {
        return Err(AppError::Validation(
            "duration_minutes must be non-negative".to_string(),
        ));
    }
    if request.calories_burned < 0 {
        return Err(AppError::Validation(
            "calories_burned must be non-negative".to_string(),
        ));
    }

    let activity = store::insert_activity(&state.db, &request).await?;
    info!(
        "Tracked activity {} ({}) for user {}",
        activity.id, activity.activity_type, activity.user_id
    );

    let state = state.clone();
    let tracked = activity.clone();
    tokio::spawn(async move {
        let rec = generate_recommendation(state.ai.as_ref(), &tracked).await;
        match recommendation::store::save(&state.db, &rec).await {
            Ok(()) => info!("Saved recommendation {} for activity {}", rec.id, tracked.id),
            Err(e) => error!(
                "Failed to persist recommendation for activity {}: {e}",
                tracked.id
            ),
        }
    });

    Ok(Json(activity))
}

/// GET /api/v1/activities/user/:user_id
pub async fn handle_get_user_activities(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ActivityRow>>, AppError> {
    let activities = store::find_by_user_id(&state.db, user_id).await?;
    Ok(Json(activities))
}

/// GET /api/v1/activities/:id
pub async fn handle_get_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
) -> Result<Json<ActivityRow>, AppError> {
    store::find_by_id(&state.db, activity_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Activity {activity_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_request_defaults_metrics_to_empty_object() {
        let json = serde_json::json!({
            "user_id": Uuid::new_v4(),
            "activity_type": "CYCLING",
            "duration_minutes": 60,
            "calories_burned": 550,
            "start_time": "2026-03-14T07:30:00Z"
        });
        let request: TrackActivityRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.additional_metrics, serde_json::json!({}));
    }

    #[test]
    fn test_track_request_accepts_mixed_metric_values() {
        let json = serde_json::json!({
            "user_id": Uuid::new_v4(),
            "activity_type": "RUNNING",
            "duration_minutes": 30,
            "calories_burned": 280,
            "start_time": "2026-03-14T07:30:00Z",
            "additional_metrics": {"avgHeartRate": 148, "terrain": "trail"}
        });
        let request: TrackActivityRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.additional_metrics["terrain"], "trail");
    }
}
