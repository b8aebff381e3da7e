//! Source documents and the read-only document store seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::generation::{GenerationOptions, GenerationRequest};
use crate::error::{LecternError, Result};

/// One uploaded document and the text extracted from it, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub file_name: String,
    pub extracted_text: Option<String>,
}

impl SourceDocument {
    pub fn new(file_name: impl Into<String>, extracted_text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            extracted_text: Some(extracted_text.into()),
        }
    }

    /// A document whose text extraction has not produced anything.
    pub fn without_text(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            extracted_text: None,
        }
    }

    /// Extracted text, if present and not whitespace-only.
    pub fn usable_text(&self) -> Option<&str> {
        self.extracted_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Read-only access to stored documents' extracted text.
///
/// Implemented by the application's storage layer; Lectern never writes back.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the documents with the given ids. Unknown ids are skipped.
    async fn fetch_documents(&self, ids: &[String]) -> Result<Vec<SourceDocument>>;
}

impl GenerationRequest {
    /// Resolve `ids` through `store` and build a request from the result.
    pub async fn from_store(
        store: &dyn DocumentStore,
        ids: &[String],
        options: GenerationOptions,
    ) -> Result<Self> {
        if ids.is_empty() {
            return Err(LecternError::NoDocuments);
        }
        let documents = store.fetch_documents(ids).await?;
        if documents.is_empty() {
            return Err(LecternError::NoDocuments);
        }
        Ok(Self::new(documents, options))
    }
}
