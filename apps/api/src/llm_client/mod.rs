/// AI Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All generative-AI interactions MUST go through this module.
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Capability to exchange a prompt for the provider's raw response body.
///
/// The body is returned untouched — unwrapping the provider envelope is the
/// caller's concern, which lets tests inject a stub implementation handing
/// back canned payloads with no network involved.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_prompt(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Gemini-backed [`AiClient`] used in production.
///
/// One attempt per call, bounded by a request timeout. Failures are not
/// retried here: callers fall back to their own default content instead of
/// blocking on the provider.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn send_prompt(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .client
            .post(format!("{}?key={}", self.api_url, self.api_key))
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!("Gemini call succeeded ({} bytes)", body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_status() {
        let err = LlmError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("429"));
        assert!(rendered.contains("quota exceeded"));
    }

    #[test]
    fn test_gemini_client_builds() {
        let client = GeminiClient::new(
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent".to_string(),
            "test-key".to_string(),
        );
        assert!(client.api_url.ends_with("generateContent"));
    }
}
