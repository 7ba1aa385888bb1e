use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A tracked fitness activity. Owned by the activity subsystem; the
/// recommendation pipeline reads it and never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Activity type tag, e.g. "RUNNING", "CYCLING".
    pub activity_type: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub start_time: DateTime<Utc>,
    /// Free-form key → numeric/string metrics (heart rate, cadence, ...).
    pub additional_metrics: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
