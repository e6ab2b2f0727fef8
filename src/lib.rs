//! Turn raw ideas into social media posts.
//!
//! This library builds a platform-specific prompt from a short idea, sends it
//! to an OpenAI-compatible chat completion endpoint, and decodes the reply into
//! a title/body pair. The API key lives in a small local key-value store.

pub mod clipboard;
pub mod credentials;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod providers;
pub mod session;
pub mod types;

// Re-export core types for easy usage
pub use credentials::{Credential, CredentialStore, FileStore, InMemoryStore, KeyValueStore};
pub use error::{Error, ErrorKind, Notice};
pub use pipeline::{build_request, decode_post, PostGenerator, PreparedRun};
pub use provider::{CompletionProvider, CompletionRequest};
pub use providers::*;
pub use session::{ErrorDetail, GenerationTask, PipelineState, RunToken, Session};
pub use types::*;
