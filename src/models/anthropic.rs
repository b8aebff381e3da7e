//! Anthropic model definitions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Anthropic models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
pub enum AnthropicModel {
    #[strum(serialize = "claude-opus-4-5-20251101")]
    ClaudeOpus45,
    #[strum(serialize = "claude-sonnet-4-5-20250514")]
    ClaudeSonnet45,
    #[strum(serialize = "claude-sonnet-4-20250514")]
    ClaudeSonnet4,
    #[strum(serialize = "claude-haiku-3-5-20241022")]
    ClaudeHaiku35,
    /// Custom/unknown Anthropic model by ID.
    #[strum(default)]
    Custom(String),
}

impl Default for AnthropicModel {
    fn default() -> Self {
        Self::ClaudeSonnet4
    }
}

impl AnthropicModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ClaudeOpus45 => "claude-opus-4-5-20251101",
            Self::ClaudeSonnet45 => "claude-sonnet-4-5-20250514",
            Self::ClaudeSonnet4 => "claude-sonnet-4-20250514",
            Self::ClaudeHaiku35 => "claude-haiku-3-5-20241022",
            Self::Custom(s) => s,
        }
    }

    /// Hard ceiling on output tokens for this model.
    pub fn max_output_tokens(&self) -> u32 {
        match self {
            Self::ClaudeOpus45 | Self::ClaudeSonnet45 | Self::ClaudeSonnet4 => 64_000,
            Self::ClaudeHaiku35 => 8_192,
            Self::Custom(_) => 8_192,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn unknown_id_becomes_custom() {
        let model = AnthropicModel::from_str("claude-next").unwrap();
        assert_eq!(model, AnthropicModel::Custom("claude-next".into()));
        assert_eq!(model.as_str(), "claude-next");
    }

    #[test]
    fn known_id_round_trips() {
        let model = AnthropicModel::from_str("claude-sonnet-4-20250514").unwrap();
        assert_eq!(model, AnthropicModel::ClaudeSonnet4);
        assert_eq!(model.to_string(), model.as_str());
    }
}
