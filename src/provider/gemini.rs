//! Google Gemini `generateContent` client.

use std::str::FromStr;

use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ProviderSettings;
use crate::error::ProviderError;
use crate::models::{GeminiModel, ProviderKind};
use crate::types::UsageReport;

use super::http::{gemini_headers, send_json, shared_client};
use super::{ProviderClient, ProviderRequest, ProviderResponse, StopReason};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Finish reasons that mean the output was withheld.
const BLOCKED_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

pub struct GeminiClient {
    model: GeminiModel,
    api_key: Option<String>,
    base_url: String,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(settings: &ProviderSettings) -> Self {
        let model = settings
            .model
            .as_deref()
            .map(|id| GeminiModel::from_str(id).unwrap_or(GeminiModel::Custom(id.to_string())))
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

    // Gemini has no per-request cache hint; `cache_system_prompt` is ignored.
    fn build_request_body(&self, request: &ProviderRequest) -> serde_json::Value {
        let max_tokens = request
            .max_output_tokens
            .unwrap_or(self.max_output_tokens)
            .min(self.model.max_output_tokens());

        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": request.user_prompt}],
            }],
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": max_tokens,
            },
        });

        if !request.system_prompt.is_empty() {
            if let Some(obj) = body.as_object_mut() {
                obj.insert(
                    "systemInstruction".into(),
                    serde_json::json!({"parts": [{"text": request.system_prompt}]}),
                );
            }
        }

        body
    }
}

#[async_trait]
impl ProviderClient for GeminiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
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
            .ok_or(ProviderError::Unconfigured(ProviderKind::Gemini))?;

        let body = self.build_request_body(request);
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url,
            self.model.as_str()
        );

        debug!(model = self.model.as_str(), "Gemini send");

        let call = shared_client()
            .post(&url)
            .headers(gemini_headers(api_key))
            .json(&body);
        let data: GeminiResponse = send_json(ProviderKind::Gemini, call, cancel).await?;

        if let Some(reason) = data
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            return Err(ProviderError::failed(
                ProviderKind::Gemini,
                format!("prompt was blocked: {reason}"),
            ));
        }

        let candidate = data.candidates.into_iter().next();
        let finish_reason = candidate
            .as_ref()
            .and_then(|c| c.finish_reason.clone())
            .unwrap_or_default();
        if BLOCKED_FINISH_REASONS.contains(&finish_reason.as_str()) {
            return Err(ProviderError::failed(
                ProviderKind::Gemini,
                format!("response was blocked: {finish_reason}"),
            ));
        }
        let stop_reason = match finish_reason.as_str() {
            "STOP" => StopReason::EndTurn,
            "MAX_TOKENS" => StopReason::MaxTokens,
            _ => StopReason::Other,
        };

        let text: String = candidate
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter(|part| !part.thought)
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse(ProviderKind::Gemini));
        }

        let usage = data.usage_metadata.unwrap_or_default();
        Ok(ProviderResponse {
            id: data.response_id,
            text,
            provider: ProviderKind::Gemini,
            model: data
                .model_version
                .unwrap_or_else(|| self.model.as_str().to_string()),
            stop_reason,
            usage: UsageReport {
                input_tokens: usage.prompt_token_count,
                // Thinking tokens are billed as output.
                output_tokens: usage.candidates_token_count + usage.thoughts_token_count,
                cache_read_tokens: usage.cached_content_token_count,
                cache_write_tokens: 0,
            },
        })
    }
}

// Internal Gemini response types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    response_id: String,
    #[serde(default)]
    model_version: Option<String>,
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
    #[serde(default)]
    cached_content_token_count: u64,
    #[serde(default)]
    thoughts_token_count: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
