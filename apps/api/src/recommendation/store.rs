use sqlx::PgPool;
use uuid::Uuid;

use crate::models::recommendation::RecommendationRow;

/// Persists a freshly assembled recommendation. Rows are insert-only:
/// regeneration writes a new row instead of updating an existing one.
pub async fn save(pool: &PgPool, rec: &RecommendationRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO recommendations
            (id, activity_id, user_id, activity_type, recommendation,
             improvements, suggestions, safety, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(rec.id)
    .bind(rec.activity_id)
    .bind(rec.user_id)
    .bind(&rec.activity_type)
    .bind(&rec.recommendation)
    .bind(&rec.improvements)
    .bind(&rec.suggestions)
    .bind(&rec.safety)
    .bind(rec.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// All recommendations for a user, newest first. Empty when none exist.
pub async fn find_by_user_id(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<RecommendationRow>, sqlx::Error> {
    sqlx::query_as::<_, RecommendationRow>(
        "SELECT * FROM recommendations WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// The latest recommendation generated for an activity, if any.
pub async fn find_by_activity_id(
    pool: &PgPool,
    activity_id: Uuid,
) -> Result<Option<RecommendationRow>, sqlx::Error> {
    sqlx::query_as::<_, RecommendationRow>(
        "SELECT * FROM recommendations WHERE activity_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(activity_id)
    .fetch_optional(pool)
    .await
}
