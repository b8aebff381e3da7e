//! Shared HTTP client, auth headers, and error mapping.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::ProviderError;
use crate::models::ProviderKind;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Build Anthropic-style headers (x-api-key).
pub fn anthropic_headers(api_key: &str, version: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(api_key) {
        headers.insert("x-api-key", val);
    }
    if let Ok(val) = HeaderValue::from_str(version) {
        headers.insert("anthropic-version", val);
    }
    headers
}

/// Build Gemini headers (x-goog-api-key). Keys stay out of request URLs.
pub fn gemini_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(api_key) {
        headers.insert("x-goog-api-key", val);
    }
    headers
}

/// Map a non-2xx status into a request failure, keeping the provider's message.
pub fn status_to_error(provider: ProviderKind, status: u16, body: &str) -> ProviderError {
    ProviderError::RequestFailed {
        provider,
        status: Some(status),
        message: extract_error_message(body).unwrap_or_else(|| truncate(body, 500)),
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    // Both providers use {"error": {"message": "..."}}
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Send a prepared request and decode a JSON body, racing the cancellation token.
pub async fn send_json<T: DeserializeOwned>(
    provider: ProviderKind,
    request: reqwest::RequestBuilder,
    cancel: &CancellationToken,
) -> Result<T, ProviderError> {
    let call = async {
        let resp = request
            .send()
            .await
            .map_err(|e| ProviderError::failed(provider, e.to_string()))?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(provider, status, &body_text));
        }

        resp.json::<T>()
            .await
            .map_err(|e| ProviderError::failed(provider, format!("invalid response body: {e}")))
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ProviderError::Cancelled),
        result = call => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_prefers_provider_message() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        match status_to_error(ProviderKind::Anthropic, 529, body) {
            ProviderError::RequestFailed { status, message, .. } => {
                assert_eq!(status, Some(529));
                assert_eq!(message, "Overloaded");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn status_error_truncates_raw_bodies() {
        let body = "x".repeat(600);
        match status_to_error(ProviderKind::Gemini, 502, &body) {
            ProviderError::RequestFailed { message, .. } => {
                assert_eq!(message.chars().count(), 503);
                assert!(message.ends_with("..."));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn gemini_headers_carry_key() {
        let headers = gemini_headers("g-key");
        assert_eq!(headers.get("x-goog-api-key").unwrap().to_str().unwrap(), "g-key");
    }
}
