use super::message::Message;
use super::platform::Platform;

/// An ordered sequence of chat messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prompt {
    messages: Vec<Message>,
}

impl Prompt {
    /// Create a prompt with a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(content)],
        }
    }

    /// Add a user message.
    pub fn with_user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Get the messages.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// The two-message prompt asking for a post about `idea` on `platform`.
    ///
    /// The system message carries the platform's style directive and the
    /// JSON output contract; the user message carries the idea verbatim.
    pub fn for_post(idea: &str, platform: Platform) -> Self {
        Prompt::system(system_directive(platform)).with_user(user_request(idea, platform))
    }
}

/// Maximum title length requested from the model.
pub const MAX_TITLE_CHARS: usize = 100;

pub fn system_directive(platform: Platform) -> String {
    format!(
        "You are a viral social media content creator. Create engaging, authentic posts optimized for {}.

Format your response as JSON with two fields:
- \"title\": A compelling headline (max {MAX_TITLE_CHARS} chars)
- \"content\": The full post body with proper formatting, emojis, and structure for the platform

Respond with the JSON object only.
Make it feel human, relatable, and shareable.",
        platform.style_directive()
    )
}

pub fn user_request(idea: &str, platform: Platform) -> String {
    format!("Create a viral {platform} post based on this idea: {idea}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_prompt_builder() {
        let prompt = Prompt::system("You are a helpful assistant").with_user("Hello");
        assert_eq!(prompt.messages().len(), 2);
        assert_eq!(prompt.messages()[0].role(), Role::System);
        assert_eq!(prompt.messages()[1].role(), Role::User);
    }

    #[test]
    fn test_post_prompt_layout() {
        let prompt = Prompt::for_post("time-blocking changed my week", Platform::Twitter);
        let messages = prompt.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role(), Role::System);
        assert!(messages[0].content.contains(Platform::Twitter.style_directive()));
        assert!(messages[0].content.contains("\"title\""));
        assert!(messages[0].content.contains("\"content\""));
        assert_eq!(
            messages[1].content,
            "Create a viral twitter post based on this idea: time-blocking changed my week"
        );
    }

    #[test]
    fn test_directives_differ_per_platform() {
        assert_ne!(
            system_directive(Platform::LinkedIn),
            system_directive(Platform::Twitter)
        );
    }
}
