//! Core types used throughout the library.

pub mod config;
pub mod message;
pub mod platform;
pub mod post;
pub mod prompt;

// Re-export commonly used types
pub use config::*;
pub use message::*;
pub use platform::*;
pub use post::*;
pub use prompt::*;
