//! Anthropic Messages API client.

use std::str::FromStr;

use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ProviderSettings;
use crate::error::ProviderError;
use crate::models::{AnthropicModel, ProviderKind};
use crate::types::UsageReport;

use super::http::{anthropic_headers, send_json, shared_client};
use super::{ProviderClient, ProviderRequest, ProviderResponse, StopReason};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

pub struct AnthropicClient {
    model: AnthropicModel,
    api_key: Option<String>,
    base_url: String,
    max_output_tokens: u32,
}

impl AnthropicClient {
    pub fn new(settings: &ProviderSettings) -> Self {
        let model = settings
            .model
            .as_deref()
            .map(|id| AnthropicModel::from_str(id).unwrap_or(AnthropicModel::Custom(id.to_string())))
            .unwrap_or_default();
        Self {
            api_key: settings
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            base_url: settings
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            max_output_tokens: settings
                .max_output_tokens
                .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
            model,
        }
    }

    fn build_request_body(&self, request: &ProviderRequest) -> serde_json::Value {
        let max_tokens = request
            .max_output_tokens
            .unwrap_or(self.max_output_tokens)
            .min(self.model.max_output_tokens());

        let mut body = serde_json::json!({
            "model": self.model.as_str(),
            "max_tokens": max_tokens,
            "temperature": request.temperature,
            "messages": [{
                "role": "user",
                "content": request.user_prompt,
            }],
        });

        if !request.system_prompt.is_empty() {
            let system = if request.cache_system_prompt {
                serde_json::json!([{
                    "type": "text",
                    "text": request.system_prompt,
                    "cache_control": {"type": "ephemeral"},
                }])
            } else {
                serde_json::Value::String(request.system_prompt.clone())
            };
            if let Some(obj) = body.as_object_mut() {
                obj.insert("system".into(), system);
            }
        }

        body
    }
}

#[async_trait]
impl ProviderClient for AnthropicClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(
        &self,
        request: &ProviderRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderResponse, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::Unconfigured(ProviderKind::Anthropic))?;

        let body = self.build_request_body(request);
        let url = format!("{}/messages", self.base_url);

        debug!(model = self.model.as_str(), "Anthropic send");

        let call = shared_client()
            .post(&url)
            .headers(anthropic_headers(api_key, API_VERSION))
            .json(&body);
        let data: AnthropicResponse = send_json(ProviderKind::Anthropic, call, cancel).await?;

        let stop_reason = match data.stop_reason.as_deref() {
            Some("end_turn") => StopReason::EndTurn,
            Some("max_tokens") => StopReason::MaxTokens,
            Some("stop_sequence") => StopReason::StopSequence,
            Some("refusal") => StopReason::Safety,
            _ => StopReason::Other,
        };
        if stop_reason == StopReason::Safety {
            return Err(ProviderError::failed(
                ProviderKind::Anthropic,
                "response was stopped by the provider's safety filters",
            ));
        }

        let text: String = data
            .content
            .iter()
            .filter(|block| block.r#type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse(ProviderKind::Anthropic));
        }

        Ok(ProviderResponse {
            id: data.id,
            text,
            provider: ProviderKind::Anthropic,
            model: data.model.unwrap_or_else(|| self.model.as_str().to_string()),
            stop_reason,
            usage: UsageReport {
                input_tokens: data.usage.input_tokens,
                output_tokens: data.usage.output_tokens,
                cache_read_tokens: data.usage.cache_read_input_tokens.unwrap_or(0),
                cache_write_tokens: data.usage.cache_creation_input_tokens.unwrap_or(0),
            },
        })
    }
}

// Internal Anthropic response types

#[derive(Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    content: Vec<AnthropicContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
struct AnthropicContentBlock {
    r#type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Default)]
struct AnthropicUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
    #[serde(default)]
    cache_read_input_tokens: Option<u64>,
    #[serde(default)]
    cache_creation_input_tokens: Option<u64>,
}
