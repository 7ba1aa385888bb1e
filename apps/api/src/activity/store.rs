use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::activity::handlers::TrackActivityRequest;
use crate::models::activity::ActivityRow;

/// Inserts a new activity and returns the stored row.
pub async fn insert_activity(
    pool: &PgPool,
    request: &TrackActivityRequest,
) -> Result<ActivityRow, sqlx::Error> {
    let now = Utc::now();
    let activity = ActivityRow {
        id: Uuid::new_v4(),
        user_id: request.user_id,
        activity_type: request.activity_type.clone(),
        duration_minutes: request.duration_minutes,
        calories_burned: request.calories_burned,
        start_time: request.start_time,
        additional_metrics: request.additional_metrics.clone(),
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO activities
            (id, user_id, activity_type, duration_minutes, calories_burned,
             start_time, additional_metrics, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(activity.id)
    .bind(activity.user_id)
    .bind(&activity.activity_type)
    .bind(activity.duration_minutes)
    .bind(activity.calories_burned)
    .bind(activity.start_time)
    .bind(&activity.additional_metrics)
    .bind(activity.created_at)
    .bind(activity.updated_at)
    .execute(pool)
    .await?;

    Ok(activity)
}

/// All activities tracked by a user, newest start first.
pub async fn find_by_user_id(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ActivityRow>, sqlx::Error> {
    sqlx::query_as::<_, ActivityRow>(
        "SELECT * FROM activities WHERE user_id = $1 ORDER BY start_time DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    activity_id: Uuid,
) -> Result<Option<ActivityRow>, sqlx::Error> {
    sqlx::query_as::<_, ActivityRow>("SELECT * FROM activities WHERE id = $1")
        .bind(activity_id)
        .fetch_optional(pool)
        .await
}
