//! Validated study artifacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::generation::ArtifactKind;
use super::usage::UsageReport;
use crate::models::ProviderKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flashcard {
    /// Zero-based, contiguous position within the set.
    pub order: usize,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlashcardSet {
    pub cards: Vec<Flashcard>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PracticeQuestion {
    pub order: usize,
    pub question: String,
    pub options: Vec<String>,
    /// Always equal to one entry of `options`.
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PracticeQuestionSet {
    pub questions: Vec<PracticeQuestion>,
}

/// Free-form markdown output (summaries, essay-style tests).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FreeText {
    pub text: String,
}

/// Parsed, validated content of one generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ArtifactContent {
    Flashcards(FlashcardSet),
    PracticeQuestions(PracticeQuestionSet),
    Essay(FreeText),
    Summary(FreeText),
}

impl ArtifactContent {
    /// Number of items (cards or questions); free text counts as one.
    pub fn item_count(&self) -> usize {
        match self {
            Self::Flashcards(set) => set.cards.len(),
            Self::PracticeQuestions(set) => set.questions.len(),
            Self::Essay(_) | Self::Summary(_) => 1,
        }
    }
}

/// The result handed back to the caller, who is responsible for persisting it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedArtifact {
    pub id: Uuid,
    pub title: String,
    pub kind: ArtifactKind,
    pub content: ArtifactContent,
    /// Model output exactly as received, kept for audit. Never re-parsed.
    pub raw_text: String,
    pub provider: ProviderKind,
    pub model: String,
    pub response_id: String,
    pub usage: UsageReport,
    pub created_at: DateTime<Utc>,
}
