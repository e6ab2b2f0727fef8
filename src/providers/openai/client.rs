use super::types::{ChatCompletionsRequest, ChatCompletionsResponse, ChatMessage, OpenAIError};
use crate::credentials::Credential;
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::types::{GenerationConfig, DEFAULT_BASE_URL};
use crate::Error;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// OpenAI provider implementation.
pub struct OpenAIProvider {
    client: Client,
    base_url: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider.
    pub fn new() -> Result<Self, Error> {
        Self::new_with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a new OpenAI provider with custom base URL.
    pub fn new_with_base_url(base_url: String) -> Result<Self, Error> {
        Self::build(base_url, Duration::from_secs(crate::types::DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider using the endpoint and timeout from `config`.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, Error> {
        Self::build(config.base_url.clone(), config.timeout)
    }

    fn build(base_url: String, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Convert a request to the Chat Completions wire format.
    fn convert_request(request: &CompletionRequest) -> ChatCompletionsRequest {
        ChatCompletionsRequest {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|msg| ChatMessage {
                    role: msg.role.as_str().to_string(),
                    content: msg.content.clone(),
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    /// Message for a non-success status: the body's `error.message`, else a generic line.
    fn error_message(status: StatusCode, body: &str) -> String {
        serde_json::from_str::<OpenAIError>(body)
            .ok()
            .and_then(|err| err.error.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("API error: {}", status.as_u16()))
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn complete(
        &self,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<String, Error> {
        let body = Self::convert_request(request);
        debug!(model = %body.model, base_url = %self.base_url, "sending chat completion request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(credential.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body still gets the generic message.
            let error_text = response.text().await.unwrap_or_default();
            let message = Self::error_message(status, &error_text);
            warn!(status = status.as_u16(), %message, "completion request rejected");
            return Err(Error::api(status.as_u16(), message));
        }

        let text = response.text().await?;
        let completion: ChatCompletionsResponse = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "completion response was not the expected shape");
            Error::api(
                status.as_u16(),
                "API error: response was not a chat completion",
            )
        })?;
        debug!(choices = completion.choices.len(), "chat completion received");

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::api(status.as_u16(), "API error: response contained no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Prompt;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAIProvider::new().unwrap();
        assert_eq!(provider.base_url(), "https://api.openai.com/v1");

        let custom = OpenAIProvider::new_with_base_url("http://localhost:9000/v1/".to_string())
            .unwrap();
        assert_eq!(custom.base_url(), "http://localhost:9000/v1");
    }

    #[test]
    fn test_request_conversion() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: Prompt::system("sys").with_user("hi").into_messages(),
            temperature: 0.9,
            max_tokens: 800,
        };

        let body = serde_json::to_value(OpenAIProvider::convert_request(&request)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ],
                "temperature": 0.9f32,
                "max_tokens": 800
            })
        );
    }

    #[test]
    fn test_error_message_extraction() {
        let status = StatusCode::UNAUTHORIZED;
        assert_eq!(
            OpenAIProvider::error_message(status, r#"{"error":{"message":"invalid_api_key"}}"#),
            "invalid_api_key"
        );
        assert_eq!(
            OpenAIProvider::error_message(status, "<html>bad gateway</html>"),
            "API error: 401"
        );
        assert_eq!(
            OpenAIProvider::error_message(status, r#"{"error":{"message":""}}"#),
            "API error: 401"
        );
        assert_eq!(
            OpenAIProvider::error_message(
                StatusCode::TOO_MANY_REQUESTS,
                r#"{"error":{"message":"quota","code":429}}"#
            ),
            "quota"
        );
    }
}
