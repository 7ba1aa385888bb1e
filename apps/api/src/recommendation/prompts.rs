// Prompt constants for the recommendation pipeline.
// The reply schema below is a contract with the Gemini provider — the
// parser expects exactly these keys. Do not reword the JSON block without
// updating the parser and its fixtures.

/// Activity analysis prompt template.
/// Replace: `{activity_type}`, `{duration}`, `{calories}`, `{metrics}`.
pub const ACTIVITY_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this fitness activity and provide detailed recommendations in the following EXACT JSON format:
{
  "analysis": {
    "overall": "Overall analysis here",
    "pace": "Pace analysis here",
    "heartRate": "Heart rate analysis here",
    "caloriesBurned": "Calories analysis here"
  },
  "improvements": [
    {
      "area": "Area name",
      "recommendation": "Detailed recommendation"
    }
  ],
  "suggestions": [
    {
      "workout": "Workout name",
      "description": "Detailed workout description"
    }
  ],
  "safety": [
    "Safety point 1",
    "Safety point 2"
  ]
}

Analyze this activity:
Activity Type: {activity_type}
Duration: {duration} minutes
Calories Burned: {calories}
Additional Metrics: {metrics}

Provide detailed analysis focusing on performance, improvements, next workout suggestions, and safety guidelines.
Ensure the response follows the EXACT JSON format shown above.
"#;
