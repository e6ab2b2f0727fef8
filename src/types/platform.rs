use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Social network a post is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    LinkedIn,
    Twitter,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::LinkedIn, Platform::Twitter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "linkedin",
            Platform::Twitter => "twitter",
        }
    }

    /// Human-readable name shown next to a generated post.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "Twitter",
        }
    }

    /// Line printed under a generated post.
    pub fn footer(&self) -> String {
        format!("✨ Generated for {}", self.label())
    }

    /// Tone and format guidance embedded in the system prompt.
    pub fn style_directive(&self) -> &'static str {
        match self {
            Platform::LinkedIn => {
                "LinkedIn (professional, educational, with emojis and formatting for engagement)"
            }
            Platform::Twitter => "Twitter (concise, punchy, thread format with emojis)",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linkedin" => Ok(Platform::LinkedIn),
            "twitter" | "x" => Ok(Platform::Twitter),
            other => Err(Error::config(format!(
                "Invalid platform '{other}'. Valid values are: linkedin, twitter"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("LinkedIn".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert_eq!(" TWITTER ".parse::<Platform>().unwrap(), Platform::Twitter);
        assert!("mastodon".parse::<Platform>().is_err());
    }

    #[test]
    fn test_display_matches_wire_name() {
        for platform in Platform::ALL {
            assert_eq!(platform.to_string(), platform.as_str());
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{}\"", platform.as_str()));
        }
    }

    #[test]
    fn test_footer_names_platform_label() {
        assert_eq!(Platform::LinkedIn.footer(), "✨ Generated for LinkedIn");
        assert_eq!(Platform::Twitter.footer(), "✨ Generated for Twitter");
    }

    #[test]
    fn test_default_is_linkedin() {
        assert_eq!(Platform::default(), Platform::LinkedIn);
    }
}
