//! Recommendation generation — orchestrates the full pipeline for one activity.
//!
//! Flow: build prompt → Gemini call → parse reply → assemble Recommendation.
//!
//! This is a total function: a transport failure or an unparseable reply
//! produces the fixed default recommendation instead of an error, so
//! activity tracking is never blocked by the AI provider.

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::llm_client::AiClient;
use crate::models::activity::ActivityRow;
use crate::models::recommendation::RecommendationRow;
use crate::recommendation::parser::{parse_coach_reply, ParsedSections};
use crate::recommendation::prompts::ACTIVITY_ANALYSIS_PROMPT_TEMPLATE;

// ────────────────────────────────────────────────────────────────────────────
// Default recommendation content
// ────────────────────────────────────────────────────────────────────────────

// Served whenever generation cannot complete. Deliberately activity-agnostic:
// only the identifiers are taken from the source activity.
const DEFAULT_NARRATIVE: &str =
    "Keep maintaining consistency in your activity. Regular effort matters more than intensity.";

const DEFAULT_IMPROVEMENTS: &[&str] = &[
    "Increase consistency if activity frequency is low",
    "Ensure proper warm-up and cool-down",
    "Track progress weekly",
];

const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Stay hydrated",
    "Maintain proper posture",
    "Allow adequate recovery time",
];

const DEFAULT_SAFETY: &[&str] = &[
    "Avoid overtraining",
    "Stop immediately if you feel pain or dizziness",
];

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Generates coaching feedback for a tracked activity.
///
/// Always returns a valid recommendation: AI transport errors and parse
/// failures are logged and collapsed into [`default_recommendation`].
pub async fn generate_recommendation(
    ai: &dyn AiClient,
    activity: &ActivityRow,
) -> RecommendationRow {
    let prompt = build_activity_prompt(activity);

    let raw = match ai.send_prompt(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(
                "AI call failed for activity {}: {e} — serving default recommendation",
                activity.id
            );
            return default_recommendation(activity);
        }
    };

    match parse_coach_reply(&raw) {
        Ok(sections) => assemble(activity, sections),
        Err(e) => {
            warn!(
                "Unusable AI reply for activity {}: {e} — serving default recommendation",
                activity.id
            );
            default_recommendation(activity)
        }
    }
}

/// Renders an activity into the fixed analysis prompt. Pure — the same
/// activity always produces byte-identical prompt text.
pub fn build_activity_prompt(activity: &ActivityRow) -> String {
    ACTIVITY_ANALYSIS_PROMPT_TEMPLATE
        .replace("{activity_type}", &activity.activity_type)
        .replace("{duration}", &activity.duration_minutes.to_string())
        .replace("{calories}", &activity.calories_burned.to_string())
        .replace("{metrics}", &activity.additional_metrics.to_string())
}

fn assemble(activity: &ActivityRow, sections: ParsedSections) -> RecommendationRow {
    RecommendationRow {
        id: Uuid::new_v4(),
        activity_id: activity.id,
        user_id: activity.user_id,
        activity_type: activity.activity_type.clone(),
        recommendation: sections.narrative,
        improvements: sections.improvements,
        suggestions: sections.suggestions,
        safety: sections.safety,
        created_at: Utc::now(),
    }
}

/// The fixed worst-case recommendation. Identifiers still reflect the
/// source activity; everything else is constant.
pub fn default_recommendation(activity: &ActivityRow) -> RecommendationRow {
    RecommendationRow {
        id: Uuid::new_v4(),
        activity_id: activity.id,
        user_id: activity.user_id,
        activity_type: activity.activity_type.clone(),
        recommendation: DEFAULT_NARRATIVE.to_string(),
        improvements: DEFAULT_IMPROVEMENTS.iter().map(|s| s.to_string()).collect(),
        suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        safety: DEFAULT_SAFETY.iter().map(|s| s.to_string()).collect(),
        created_at: Utc::now(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::json;

    use crate::llm_client::LlmError;

    /// Stub client returning a canned response body.
    struct CannedClient(String);

    #[async_trait]
    impl AiClient for CannedClient {
        async fn send_prompt(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    /// Stub client failing every call, as an unreachable provider would.
    struct FailingClient;

    #[async_trait]
    impl AiClient for FailingClient {
        async fn send_prompt(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
        }
    }

    fn sample_activity() -> ActivityRow {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 7, 30, 0).unwrap();
        ActivityRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            activity_type: "RUNNING".to_string(),
            duration_minutes: 45,
            calories_burned: 420,
            start_time: now,
            additional_metrics: json!({"avgHeartRate": 152, "distanceKm": 8.2}),
            created_at: now,
            updated_at: now,
        }
    }

    fn well_formed_reply() -> String {
        let payload = json!({
            "analysis": {"overall": "Strong aerobic session", "pace": "Even splits"},
            "improvements": [{"area": "Cadence", "recommendation": "Aim for 180 spm"}],
            "suggestions": [{"workout": "Tempo run", "description": "30 min at threshold"}],
            "safety": ["Hydrate before and after"]
        })
        .to_string();
        json!({
            "candidates": [{ "content": { "parts": [{ "text": payload }] } }]
        })
        .to_string()
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let activity = sample_activity();
        assert_eq!(
            build_activity_prompt(&activity),
            build_activity_prompt(&activity)
        );
    }

    #[test]
    fn test_prompt_embeds_activity_fields() {
        let activity = sample_activity();
        let prompt = build_activity_prompt(&activity);
        assert!(prompt.contains("Activity Type: RUNNING"));
        assert!(prompt.contains("Duration: 45 minutes"));
        assert!(prompt.contains("Calories Burned: 420"));
        assert!(prompt.contains("avgHeartRate"));
    }

    #[test]
    fn test_prompt_reproduces_reply_schema() {
        let prompt = build_activity_prompt(&sample_activity());
        assert!(prompt.contains("EXACT JSON format"));
        for key in ["\"overall\"", "\"pace\"", "\"heartRate\"", "\"caloriesBurned\""] {
            assert!(prompt.contains(key), "schema key {key} missing from prompt");
        }
        assert!(prompt.contains("\"area\""));
        assert!(prompt.contains("\"recommendation\""));
        assert!(prompt.contains("\"workout\""));
        assert!(prompt.contains("\"description\""));
        assert!(prompt.contains("\"safety\""));
    }

    #[test]
    fn test_prompt_renders_zero_values_verbatim() {
        let mut activity = sample_activity();
        activity.duration_minutes = 0;
        activity.calories_burned = 0;
        let prompt = build_activity_prompt(&activity);
        assert!(prompt.contains("Duration: 0 minutes"));
        assert!(prompt.contains("Calories Burned: 0"));
    }

    #[tokio::test]
    async fn test_well_formed_reply_assembles_recommendation() {
        let activity = sample_activity();
        let client = CannedClient(well_formed_reply());

        let rec = generate_recommendation(&client, &activity).await;

        assert_eq!(rec.activity_id, activity.id);
        assert_eq!(rec.user_id, activity.user_id);
        assert_eq!(rec.activity_type, "RUNNING");
        assert_eq!(
            rec.recommendation,
            "OverAll: Strong aerobic session\n\nPace: Even splits"
        );
        assert_eq!(rec.improvements, vec!["Cadence: Aim for 180 spm".to_string()]);
        assert_eq!(
            rec.suggestions,
            vec!["Tempo run: 30 min at threshold".to_string()]
        );
        assert_eq!(rec.safety, vec!["Hydrate before and after".to_string()]);
    }

    #[tokio::test]
    async fn test_transport_failure_yields_default() {
        let activity = sample_activity();
        let rec = generate_recommendation(&FailingClient, &activity).await;
        assert_default_content(&rec, &activity);
    }

    #[tokio::test]
    async fn test_malformed_envelope_yields_default() {
        let activity = sample_activity();
        let client = CannedClient("<!doctype html><html>502</html>".to_string());
        let rec = generate_recommendation(&client, &activity).await;
        assert_default_content(&rec, &activity);
    }

    #[tokio::test]
    async fn test_missing_candidates_yields_default() {
        let activity = sample_activity();
        let client = CannedClient(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#.to_string());
        let rec = generate_recommendation(&client, &activity).await;
        assert_default_content(&rec, &activity);
    }

    #[tokio::test]
    async fn test_malformed_inner_payload_yields_default() {
        let activity = sample_activity();
        let raw = json!({
            "candidates": [{ "content": { "parts": [{ "text": "{ not quite json" }] } }]
        })
        .to_string();
        let rec = generate_recommendation(&CannedClient(raw), &activity).await;
        assert_default_content(&rec, &activity);
    }

    fn assert_default_content(rec: &RecommendationRow, activity: &ActivityRow) {
        assert_eq!(rec.activity_id, activity.id);
        assert_eq!(rec.user_id, activity.user_id);
        assert_eq!(rec.activity_type, activity.activity_type);
        assert_eq!(rec.recommendation, DEFAULT_NARRATIVE);
        assert_eq!(rec.improvements.len(), 3);
        assert_eq!(rec.suggestions.len(), 3);
        assert_eq!(rec.safety.len(), 2);
        assert_eq!(rec.improvements[0], DEFAULT_IMPROVEMENTS[0]);
        assert_eq!(rec.safety[1], DEFAULT_SAFETY[1]);
    }
}
