use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::title::derive_title;
use crate::config::LecternConfig;
use crate::error::{LecternError, Result};
use crate::ledger::UsageLedger;
use crate::parse::ResponseParser;
use crate::prompt::PromptBuilder;
use crate::provider::ProviderSelector;
use crate::types::{ArtifactKind, GeneratedArtifact, GenerationRequest};

/// Composes the ledger, prompt builder, provider and parser into one call.
///
/// Every failure is returned to the caller; nothing is retried. Usage is
/// recorded only once a provider response has been received, so a failed
/// or cancelled provider call costs nothing while an unparsable response
/// still counts its tokens.
#[derive(Debug)]
pub struct GenerationService {
    ledger: Arc<UsageLedger>,
    selector: ProviderSelector,
}

impl GenerationService {
    pub fn new(ledger: Arc<UsageLedger>, selector: ProviderSelector) -> Self {
        Self { ledger, selector }
    }

    pub fn from_config(config: &LecternConfig) -> Self {
        Self::new(
            Arc::new(UsageLedger::from_config(config)),
            ProviderSelector::from_config(config),
        )
    }

    pub fn ledger(&self) -> &Arc<UsageLedger> {
        &self.ledger
    }

    pub fn selector(&self) -> &ProviderSelector {
        &self.selector
    }

    pub async fn generate_flashcards(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GeneratedArtifact> {
        self.run(ArtifactKind::Flashcards, request, cancel).await
    }

    pub async fn generate_practice_test(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GeneratedArtifact> {
        self.run(ArtifactKind::PracticeTest, request, cancel).await
    }

    pub async fn generate_summary(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GeneratedArtifact> {
        self.run(ArtifactKind::Summary, request, cancel).await
    }

    /// Dispatch on the request's own kind.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GeneratedArtifact> {
        self.run(request.kind(), request, cancel).await
    }

    async fn run(
        &self,
        expected: ArtifactKind,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GeneratedArtifact> {
        let kind = request.kind();
        if kind != expected {
            return Err(LecternError::Validation(format!(
                "expected {expected} options, got {kind} options"
            )));
        }
        request.validate()?;

        self.ledger.ensure_budget().await?;

        if request.documents.is_empty() {
            return Err(LecternError::NoDocuments);
        }
        if request.documents.iter().all(|doc| doc.usable_text().is_none()) {
            return Err(LecternError::NoExtractedText);
        }

        let prompt = PromptBuilder::build_request(request)?;
        let client = self.selector.get()?;
        info!(
            %kind,
            provider = %client.kind(),
            model = client.model_id(),
            documents = request.documents.len(),
            "Generating artifact"
        );

        let provider_request = prompt.into_request().with_prompt_cache(true);
        let response = client.send(&provider_request, cancel).await?;

        self.ledger.record_usage(&response.usage).await?;
        debug!(
            response_id = %response.id,
            stop_reason = %response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Provider responded"
        );

        let content = ResponseParser::parse(request.options.output_shape(), &response.text)
            .map_err(|err| {
                warn!(%kind, provider = %response.provider, error = %err, "Unusable model output");
                err
            })?;

        let artifact = GeneratedArtifact {
            id: Uuid::new_v4(),
            title: derive_title(kind, &request.documents),
            kind,
            content,
            raw_text: response.text,
            provider: response.provider,
            model: response.model,
            response_id: response.id,
            usage: response.usage,
            created_at: Utc::now(),
        };
        info!(
            %kind,
            id = %artifact.id,
            items = artifact.content.item_count(),
            "Artifact generated"
        );
        Ok(artifact)
    }
}
