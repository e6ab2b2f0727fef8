//! Turns an idea and a platform into a [`GeneratedPost`].
//!
//! A run has two halves. [`PostGenerator::prepare`] does the local work:
//! the ordered fast-fail checks, the single credential read and request
//! construction. [`PostGenerator::execute`] makes the one network call and
//! decodes the reply. [`PostGenerator::generate`] runs both.

use crate::credentials::{Credential, CredentialStore, KeyValueStore};
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::types::{DecodedPost, GeneratedPost, GenerationConfig, Platform, Prompt, DEFAULT_TITLE};
use crate::Error;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Everything a run needs once the local checks have passed.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub platform: Platform,
    pub credential: Credential,
    pub request: CompletionRequest,
}

/// Generates posts using an injected credential store and provider.
pub struct PostGenerator<S, P> {
    credentials: CredentialStore<S>,
    provider: P,
    config: GenerationConfig,
}

impl<S, P> PostGenerator<S, P>
where
    S: KeyValueStore,
    P: CompletionProvider,
{
    pub fn new(credentials: CredentialStore<S>, provider: P, config: GenerationConfig) -> Self {
        Self {
            credentials,
            provider,
            config,
        }
    }

    pub fn credentials(&self) -> &CredentialStore<S> {
        &self.credentials
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Validate input, read the credential and build the request. No network I/O.
    pub fn prepare(&self, idea: &str, platform: Platform) -> Result<PreparedRun, Error> {
        if idea.trim().is_empty() {
            return Err(Error::EmptyIdea);
        }
        let credential = self.credentials.get()?.ok_or(Error::MissingCredential)?;

        Ok(PreparedRun {
            platform,
            credential,
            request: build_request(idea, platform, &self.config),
        })
    }

    /// Issue the request and decode the reply.
    pub async fn execute(&self, run: &PreparedRun) -> Result<DecodedPost, Error> {
        info!(platform = %run.platform, model = %run.request.model, "generating post");
        let text = self.provider.complete(&run.credential, &run.request).await?;
        let decoded = decode_post(&text);
        info!(
            platform = %run.platform,
            fallback = decoded.is_fallback(),
            "post generated"
        );
        Ok(decoded)
    }

    pub async fn generate(&self, idea: &str, platform: Platform) -> Result<GeneratedPost, Error> {
        let run = self.prepare(idea, platform)?;
        Ok(self.execute(&run).await?.into_post())
    }
}

/// The completion request for `idea` on `platform`.
pub fn build_request(idea: &str, platform: Platform, config: &GenerationConfig) -> CompletionRequest {
    CompletionRequest {
        model: config.model.clone(),
        messages: Prompt::for_post(idea, platform).into_messages(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    }
}

#[derive(Deserialize)]
struct PostPayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Decode the model's message body.
///
/// A JSON object with a non-empty string `content` is
/// [`DecodedPost::Structured`]; a missing or empty `title` becomes the
/// default. An object without usable `content` keeps its title but takes the
/// raw text as content. Anything that is not such an object keeps the raw
/// text under the default title.
pub fn decode_post(text: &str) -> DecodedPost {
    let payload = match serde_json::from_str::<PostPayload>(text.trim()) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "model reply was not a post object, using raw text");
            return DecodedPost::Fallback(GeneratedPost::new(DEFAULT_TITLE, text));
        }
    };

    let title = payload
        .title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    match payload.content.filter(|content| !content.is_empty()) {
        Some(content) => DecodedPost::Structured(GeneratedPost::new(title, content)),
        None => {
            debug!("model reply had no content field, using raw text");
            DecodedPost::Fallback(GeneratedPost::new(title, text))
        }
    }
}
