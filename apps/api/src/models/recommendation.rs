use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// AI coaching feedback for a single activity. Created exactly once per
/// generation run; regeneration inserts a new row rather than updating.
///
/// `improvements`, `suggestions` and `safety` are never empty — the parser
/// substitutes a one-element fallback list when the model supplied nothing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecommendationRow {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub user_id: Uuid,
    /// Copied from the source activity, never re-derived.
    pub activity_type: String,
    /// Concatenated labeled analysis sections. May be empty when the model
    /// returned zero analysis sections — that is still a valid result.
    pub recommendation: String,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
    pub safety: Vec<String>,
    pub created_at: DateTime<Utc>,
}
