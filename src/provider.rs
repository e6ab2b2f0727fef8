use crate::credentials::Credential;
use crate::types::Message;
use crate::Error;
use serde::Serialize;

/// A single chat completion request, independent of any wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A trait for completion endpoints that turn a prompt into text.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Issue one request and return the first choice's message text.
    async fn complete(
        &self,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<String, Error>;
}
