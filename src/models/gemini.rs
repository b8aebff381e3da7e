//! Google Gemini model definitions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Google Gemini models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
pub enum GeminiModel {
    #[strum(serialize = "gemini-2.5-pro")]
    Gemini25Pro,
    #[strum(serialize = "gemini-2.5-flash")]
    Gemini25Flash,
    #[strum(serialize = "gemini-2.5-flash-lite")]
    Gemini25FlashLite,
    #[strum(serialize = "gemini-2.0-flash")]
    Gemini20Flash,
    /// Custom/unknown Gemini model.
    #[strum(default)]
    Custom(String),
}

impl Default for GeminiModel {
    fn default() -> Self {
        Self::Gemini25Flash
    }
}

impl GeminiModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gemini25Pro => "gemini-2.5-pro",
            Self::Gemini25Flash => "gemini-2.5-flash",
            Self::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Self::Gemini20Flash => "gemini-2.0-flash",
            Self::Custom(s) => s,
        }
    }

    /// Hard ceiling on output tokens for this model.
    pub fn max_output_tokens(&self) -> u32 {
        match self {
            Self::Gemini25Pro | Self::Gemini25Flash | Self::Gemini25FlashLite => 65_536,
            Self::Gemini20Flash | Self::Custom(_) => 8_192,
        }
    }
}
