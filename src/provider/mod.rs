//! Provider client trait and implementations.

pub mod http;
pub mod selector;

#[cfg(feature = "anthropic")]
pub mod anthropic;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use selector::ProviderSelector;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::Display;
use tokio_util::sync::CancellationToken;

use crate::config::LecternConfig;
use crate::error::ProviderError;
use crate::models::ProviderKind;
use crate::types::UsageReport;

/// A single request sent to a provider. Owned by the call that builds it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Sampling temperature, always within `0.0..=1.0`.
    pub temperature: f64,
    /// Falls back to the client's configured ceiling when unset.
    pub max_output_tokens: Option<u32>,
    /// Ask the provider to cache the system prompt, where supported.
    pub cache_system_prompt: bool,
}

impl ProviderRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            temperature: 0.7,
            max_output_tokens: None,
            cache_system_prompt: false,
        }
    }

    /// Set the temperature, clamped into `0.0..=1.0`.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = if temperature.is_nan() {
            0.0
        } else {
            temperature.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    pub fn with_prompt_cache(mut self, enabled: bool) -> Self {
        self.cache_system_prompt = enabled;
        self
    }
}

/// Why the provider stopped generating, normalized across providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    Safety,
    Other,
}

/// A successful provider response.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// Provider-assigned id; empty when the provider does not return one.
    pub id: String,
    pub text: String,
    pub provider: ProviderKind,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: UsageReport,
}

/// Core trait implemented by every backend.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// The model id requests are sent to.
    fn model_id(&self) -> &str;

    /// Whether credentials are present. Pure; never touches the network.
    fn is_configured(&self) -> bool;

    /// Send one request. Fails without side effects; callers record usage
    /// only for `Ok` responses.
    async fn send(
        &self,
        request: &ProviderRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderResponse, ProviderError>;
}

/// Create the built-in client for `kind`, or `None` if its feature is disabled.
#[allow(unused_variables)]
pub fn create_client(kind: ProviderKind, config: &LecternConfig) -> Option<Arc<dyn ProviderClient>> {
    match kind {
        #[cfg(feature = "anthropic")]
        ProviderKind::Anthropic => Some(Arc::new(anthropic::AnthropicClient::new(&config.anthropic))),
        #[cfg(feature = "gemini")]
        ProviderKind::Gemini => Some(Arc::new(gemini::GeminiClient::new(&config.gemini))),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}
