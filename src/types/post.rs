use serde::{Deserialize, Serialize};

/// Title used whenever the model does not supply one.
pub const DEFAULT_TITLE: &str = "Generated Post";

/// A generated title/body pair ready to be copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub title: String,
    pub content: String,
}

impl GeneratedPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Text placed on the clipboard: title, blank line, body.
    pub fn clipboard_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.content)
    }
}

/// Outcome of decoding the model's message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedPost {
    /// The body was a JSON object with the requested fields.
    Structured(GeneratedPost),
    /// The body was not usable JSON; the raw text became the content.
    Fallback(GeneratedPost),
}

impl DecodedPost {
    pub fn post(&self) -> &GeneratedPost {
        match self {
            DecodedPost::Structured(post) | DecodedPost::Fallback(post) => post,
        }
    }

    pub fn into_post(self) -> GeneratedPost {
        match self {
            DecodedPost::Structured(post) | DecodedPost::Fallback(post) => post,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, DecodedPost::Fallback(_))
    }
}
