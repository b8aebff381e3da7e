//! Unified error classification and recovery.

use serde::{Deserialize, Serialize};

/// Broad response category for an error, used by callers to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Bad request options or missing source text. Never reaches the network.
    ClientError,
    /// Budget exhausted, no provider, or provider failure.
    ServiceUnavailable,
    /// Output could not be parsed, or local storage/config broke.
    ServerError,
    /// The caller cancelled the call.
    Cancelled,
}

impl ErrorCategory {
    /// Closest HTTP status for this category.
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ClientError => 400,
            Self::ServiceUnavailable => 503,
            Self::ServerError => 500,
            Self::Cancelled => 499,
        }
    }
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    FixRequest,
    ProvideSourceText,
    WaitForBudgetReset,
    CheckCredentials,
    CheckConfiguration,
    RetryLater,
    ReviewPrompt,
    ContactSupport,
}

impl RecoverySuggestion {
    /// Short user-facing hint.
    pub const fn hint(self) -> &'static str {
        match self {
            Self::FixRequest => "check the generation options and try again",
            Self::ProvideSourceText => "supply documents with extracted text",
            Self::WaitForBudgetReset => "the daily token budget resets at 00:00 UTC",
            Self::CheckCredentials => "set ANTHROPIC_API_KEY or GEMINI_API_KEY",
            Self::CheckConfiguration => "check LECTERN_* and provider settings",
            Self::RetryLater => "try again in a moment",
            Self::ReviewPrompt => "the model output did not match the expected format; try again",
            Self::ContactSupport => "check the usage ledger file and its permissions",
        }
    }
}
