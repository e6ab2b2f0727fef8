//! Provider implementations for completion endpoints.

pub mod openai;

// Re-export commonly used provider types
pub use openai::OpenAIProvider;
