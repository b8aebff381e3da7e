//! Shared test helpers and mock provider.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use lectern::error::ProviderError;
use lectern::generation::GenerationService;
use lectern::ledger::UsageLedger;
use lectern::models::ProviderKind;
use lectern::provider::{ProviderClient, ProviderRequest, ProviderResponse, ProviderSelector, StopReason};
use lectern::types::{SourceDocument, UsageReport};

/// A provider that returns queued results and counts calls.
pub struct MockProvider {
    kind: ProviderKind,
    configured: bool,
    wait_for_cancel: bool,
    calls: AtomicUsize,
    responses: Mutex<VecDeque<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            configured: true,
            wait_for_cancel: false,
            calls: AtomicUsize::new(0),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured(kind: ProviderKind) -> Self {
        Self {
            configured: false,
            ..Self::new(kind)
        }
    }

    /// Never answers; resolves only when the call is cancelled.
    pub fn hanging(kind: ProviderKind) -> Self {
        Self {
            wait_for_cancel: true,
            ..Self::new(kind)
        }
    }

    /// Queue a successful response with the given token counts.
    pub fn queue_text(&self, text: &str, input_tokens: u64, output_tokens: u64) {
        let response = ProviderResponse {
            id: format!("resp_{}", self.responses.lock().unwrap().len()),
            text: text.to_string(),
            provider: self.kind,
            model: "mock-model".to_string(),
            stop_reason: StopReason::EndTurn,
            usage: UsageReport::new(input_tokens, output_tokens),
        };
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn queue_error(&self, err: ProviderError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send(
        &self,
        request: &ProviderRequest,
        cancel: &CancellationToken,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if self.wait_for_cancel {
            cancel.cancelled().await;
            return Err(ProviderError::Cancelled);
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProviderError::EmptyResponse(self.kind)))
    }
}

/// Service wired to one mock provider and the given ledger.
pub fn service_with(provider: Arc<MockProvider>, ledger: Arc<UsageLedger>) -> GenerationService {
    let kind = provider.kind();
    let clients: Vec<Arc<dyn ProviderClient>> = vec![provider];
    GenerationService::new(ledger, ProviderSelector::new(clients, Some(kind)))
}

pub fn biology_docs() -> Vec<SourceDocument> {
    vec![SourceDocument::new(
        "biology.pdf",
        "Mitochondria produce ATP. Ribosomes build proteins.",
    )]
}

pub const FLASHCARDS_JSON: &str = r#"[
    {"question": "What produces ATP?", "answer": "Mitochondria"},
    {"question": "What builds proteins?", "answer": "Ribosomes"}
]"#;
