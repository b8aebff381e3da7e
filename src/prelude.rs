//! Convenience re-exports for common use.

pub use crate::config::{LecternConfig, ProviderSettings};
pub use crate::error::{LecternError, ParseError, ProviderError, Result};
pub use crate::generation::GenerationService;
pub use crate::ledger::{UsageLedger, UsageStore};
pub use crate::models::ProviderKind;
pub use crate::provider::{ProviderClient, ProviderRequest, ProviderResponse, ProviderSelector};
pub use crate::types::{
    ArtifactContent, ArtifactKind, DocumentStore, FlashcardOptions, GeneratedArtifact,
    GenerationOptions, GenerationRequest, PracticeTestOptions, SourceDocument, SummaryOptions,
    UsageReport,
};
