//! Provider identifiers and per-provider model definitions.

pub mod provider_key;

#[cfg(feature = "anthropic")]
pub mod anthropic;
#[cfg(feature = "gemini")]
pub mod gemini;

pub use provider_key::ProviderKind;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicModel;
#[cfg(feature = "gemini")]
pub use gemini::GeminiModel;
