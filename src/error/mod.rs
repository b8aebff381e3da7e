//! Error types for Lectern.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

use crate::models::ProviderKind;

/// Primary error type for all Lectern operations.
#[derive(Error, Debug)]
pub enum LecternError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Daily token budget exceeded: {used} of {limit} tokens used today")]
    BudgetExceeded { used: u64, limit: u64 },

    #[error("No AI provider is configured")]
    NoProviderConfigured,

    #[error(transparent)]
    Provider(ProviderError),

    #[error("No text content available to generate from")]
    NoContent,

    #[error("No documents were supplied")]
    NoDocuments,

    #[error("None of the supplied documents have extracted text")]
    NoExtractedText,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Generation was cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Usage storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure of a single provider call. No usage is recorded for any of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider {0} has no credentials configured")]
    Unconfigured(ProviderKind),

    #[error("Provider {provider} request failed{}: {message}", fmt_status(.status))]
    RequestFailed {
        provider: ProviderKind,
        status: Option<u16>,
        message: String,
    },

    #[error("Provider {0} returned an empty response")]
    EmptyResponse(ProviderKind),

    #[error("Provider request was cancelled")]
    Cancelled,
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl ProviderError {
    /// Request failure without an HTTP status (transport error, safety stop).
    pub fn failed(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            provider,
            status: None,
            message: message.into(),
        }
    }
}

/// The backend answered but its output could not become a valid artifact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Model output could not be parsed: {0}")]
    Unparsable(String),

    #[error("Model output contained no usable items")]
    EmptySet,

    #[error("Item {index} violates the output schema: {message}")]
    SchemaViolation { index: usize, message: String },
}

impl From<ProviderError> for LecternError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Cancelled => Self::Cancelled,
            other => Self::Provider(other),
        }
    }
}

impl LecternError {
    /// Classify this error into the response category the API layer reports.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::NoContent | Self::NoDocuments | Self::NoExtractedText => {
                ErrorCategory::ClientError
            }
            Self::BudgetExceeded { .. } | Self::NoProviderConfigured | Self::Provider(_) => {
                ErrorCategory::ServiceUnavailable
            }
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::Parse(_)
            | Self::Configuration(_)
            | Self::Storage(_)
            | Self::Io(_)
            | Self::Serialization(_) => ErrorCategory::ServerError,
        }
    }

    /// Whether tokens were spent (and recorded) before this error surfaced.
    pub fn usage_recorded(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self {
            Self::Validation(_) => RecoverySuggestion::FixRequest,
            Self::NoContent | Self::NoDocuments | Self::NoExtractedText => {
                RecoverySuggestion::ProvideSourceText
            }
            Self::BudgetExceeded { .. } => RecoverySuggestion::WaitForBudgetReset,
            Self::NoProviderConfigured | Self::Configuration(_) => {
                RecoverySuggestion::CheckConfiguration
            }
            Self::Provider(ProviderError::Unconfigured(_)) => RecoverySuggestion::CheckCredentials,
            Self::Provider(_) | Self::Cancelled => RecoverySuggestion::RetryLater,
            Self::Parse(_) => RecoverySuggestion::ReviewPrompt,
            Self::Storage(_) | Self::Io(_) | Self::Serialization(_) => {
                RecoverySuggestion::ContactSupport
            }
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LecternError>;
