use thiserror::Error;

/// Errors that can occur when generating posts or managing the stored key.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Idea is empty")]
    EmptyIdea,

    #[error("No API key is stored")]
    MissingCredential,

    #[error("API key is empty")]
    EmptyKey,

    #[error("API key must start with '{expected_prefix}'")]
    MalformedKey { expected_prefix: &'static str },

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Generation was cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

/// Coarse classification of an [`Error`], used by UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyIdea,
    MissingCredential,
    EmptyKey,
    MalformedKey,
    Api,
    Network,
    Internal,
    Cancelled,
}

/// A short user-facing message: a headline plus a sentence of detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Shown once a post is ready.
    pub fn post_generated() -> Self {
        Self::new("Post Generated! 🎉", "Your viral post is ready to copy.")
    }
}

impl Error {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Error::Network(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn clipboard(message: impl Into<String>) -> Self {
        Error::Clipboard(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyIdea => ErrorKind::EmptyIdea,
            Error::MissingCredential => ErrorKind::MissingCredential,
            Error::EmptyKey => ErrorKind::EmptyKey,
            Error::MalformedKey { .. } => ErrorKind::MalformedKey,
            Error::Api { .. } => ErrorKind::Api,
            Error::Network(_) => ErrorKind::Network,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Serialization(_)
            | Error::Storage(_)
            | Error::Config(_)
            | Error::Clipboard(_) => ErrorKind::Internal,
        }
    }

    /// Local validation failures that stop a run before it starts.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::EmptyIdea | Error::MissingCredential)
    }

    /// The message shown to the user for this error.
    pub fn notice(&self) -> Notice {
        match self {
            Error::EmptyIdea => Notice::new(
                "Please enter an idea",
                "Type something in the idea field to generate a post.",
            ),
            Error::MissingCredential => Notice::new(
                "API Key Required",
                "Please add your OpenAI API key in settings first.",
            ),
            Error::EmptyKey => Notice::new("API Key Required", "Please enter your OpenAI API key."),
            Error::MalformedKey { expected_prefix } => Notice::new(
                "Invalid API Key",
                format!("OpenAI API keys typically start with '{expected_prefix}'."),
            ),
            Error::Api { message, .. } | Error::Network(message) => {
                Notice::new("Generation Failed", message.clone())
            }
            Error::Cancelled => Notice::new("Generation Cancelled", "The request was abandoned."),
            Error::Clipboard(message) => Notice::new("Copy Failed", message.clone()),
            other => Notice::new("Something went wrong", other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_generated_notice() {
        let notice = Notice::post_generated();
        assert_eq!(notice.title, "Post Generated! 🎉");
        assert_eq!(notice.description, "Your viral post is ready to copy.");
    }

    #[test]
    fn test_api_error_displays_message_verbatim() {
        let error = Error::api(401, "invalid_api_key");
        assert_eq!(error.to_string(), "invalid_api_key");
        assert_eq!(error.kind(), ErrorKind::Api);
        assert_eq!(error.notice().title, "Generation Failed");
        assert_eq!(error.notice().description, "invalid_api_key");
    }

    #[test]
    fn test_preconditions() {
        assert!(Error::EmptyIdea.is_precondition());
        assert!(Error::MissingCredential.is_precondition());
        assert!(!Error::network("reset").is_precondition());
        assert!(!Error::EmptyKey.is_precondition());
    }

    #[test]
    fn test_malformed_key_notice_names_prefix() {
        let error = Error::MalformedKey {
            expected_prefix: "sk-",
        };
        assert!(error.notice().description.contains("'sk-'"));
        assert_eq!(error.kind(), ErrorKind::MalformedKey);
    }

    #[test]
    fn test_internal_errors() {
        let error = Error::config("bad timeout");
        assert!(error.to_string().contains("Invalid configuration"));
        assert_eq!(error.kind(), ErrorKind::Internal);
    }
}
