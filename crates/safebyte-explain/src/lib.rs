//! Explanation layer: prompt construction, chat-completion client, output normalization.

pub mod prompt;
pub mod text;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{ExplainClient, ExplainConfig, ExplainError, Explanation};
pub use prompt::{ChatRole, PromptMessage, build_messages};
pub use text::ensure_terminal_punctuation;
