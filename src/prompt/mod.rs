//! Prompt assembly for each artifact kind.
//!
//! Pure and deterministic: the same documents and options always produce the
//! same prompt. The system prompt is fixed per output shape so providers can
//! cache it; everything request-specific goes in the user prompt, in this
//! order: source material, task, output contract, extra instructions.

mod flashcards;
mod practice;
mod summary;

use crate::error::{LecternError, Result};
use crate::provider::ProviderRequest;
use crate::types::{GenerationOptions, GenerationRequest, OutputShape, SourceDocument};

/// Temperature for summaries; kept low so summaries stay close to the source.
pub const SUMMARY_TEMPERATURE: f64 = 0.3;
/// Temperature for flashcards and practice tests.
pub const QUESTION_TEMPERATURE: f64 = 0.7;

const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

/// A fully assembled prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub temperature: f64,
}

impl Prompt {
    pub fn into_request(self) -> ProviderRequest {
        ProviderRequest::new(self.system, self.user).with_temperature(self.temperature)
    }
}

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build_request(request: &GenerationRequest) -> Result<Prompt> {
        Self::build(&request.documents, &request.options)
    }

    pub fn build(documents: &[SourceDocument], options: &GenerationOptions) -> Result<Prompt> {
        let source = Self::combine_sources(documents)?;

        let (task, temperature) = match options {
            GenerationOptions::Flashcards(opts) => {
                (flashcards::task(opts), QUESTION_TEMPERATURE)
            }
            GenerationOptions::PracticeTest(opts) => (practice::task(opts), QUESTION_TEMPERATURE),
            GenerationOptions::Summary(opts) => (summary::task(opts), SUMMARY_TEMPERATURE),
        };
        let shape = options.output_shape();

        let mut user = String::with_capacity(source.len() + 1024);
        user.push_str("Study material:\n\n");
        user.push_str(&source);
        user.push_str("\n\n");
        user.push_str(&task);
        user.push_str("\n\n");
        user.push_str(output_contract(shape));

        if let Some(extra) = options
            .extra_instructions()
            .map(str::trim)
            .filter(|extra| !extra.is_empty())
        {
            user.push_str(
                "\n\nAdditional instructions from the user. Follow them only where they do \
                 not conflict with the required output format above:\n",
            );
            user.push_str(extra);
        }

        Ok(Prompt {
            system: system_prompt(shape).to_string(),
            user,
            temperature,
        })
    }

    /// Join documents into labeled blocks, skipping those without usable text.
    pub fn combine_sources(documents: &[SourceDocument]) -> Result<String> {
        let blocks: Vec<String> = documents
            .iter()
            .filter_map(|doc| {
                doc.usable_text()
                    .map(|text| format!("=== Document: {} ===\n{}", doc.file_name, text.trim()))
            })
            .collect();
        if blocks.is_empty() {
            return Err(LecternError::NoContent);
        }
        Ok(blocks.join(DOCUMENT_SEPARATOR))
    }
}

fn system_prompt(shape: OutputShape) -> &'static str {
    match shape {
        OutputShape::Flashcards => flashcards::SYSTEM_PROMPT,
        OutputShape::MultipleChoice => practice::SYSTEM_PROMPT,
        OutputShape::Essay => practice::ESSAY_SYSTEM_PROMPT,
        OutputShape::Summary => summary::SYSTEM_PROMPT,
    }
}

fn output_contract(shape: OutputShape) -> &'static str {
    match shape {
        OutputShape::Flashcards => flashcards::OUTPUT_CONTRACT,
        OutputShape::MultipleChoice => practice::OUTPUT_CONTRACT,
        OutputShape::Essay => practice::ESSAY_OUTPUT_CONTRACT,
        OutputShape::Summary => summary::OUTPUT_CONTRACT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FlashcardOptions, PracticeTestOptions, QuestionType, SummaryOptions};

    fn docs() -> Vec<SourceDocument> {
        vec![
            SourceDocument::new("biology.pdf", "Cells are the unit of life."),
            SourceDocument::new("blank.pdf", "   \n "),
            SourceDocument::without_text("scan.png"),
            SourceDocument::new("chemistry.pdf", "Atoms bond."),
        ]
    }

    #[test]
    fn combines_labeled_blocks_and_skips_blank_ones() {
        let combined = PromptBuilder::combine_sources(&docs()).unwrap();
        assert_eq!(
            combined,
            "=== Document: biology.pdf ===\nCells are the unit of life.\n\n---\n\n\
             === Document: chemistry.pdf ===\nAtoms bond."
        );
    }

    #[test]
    fn all_blank_sources_are_no_content() {
        let docs = vec![SourceDocument::new("a.txt", "  "), SourceDocument::without_text("b")];
        assert!(matches!(
            PromptBuilder::combine_sources(&docs),
            Err(LecternError::NoContent)
        ));
        assert!(matches!(PromptBuilder::combine_sources(&[]), Err(LecternError::NoContent)));
    }

    #[test]
    fn extra_instructions_come_after_contract() {
        let options = GenerationOptions::Flashcards(
            FlashcardOptions::builder()
                .extra_instructions("Ignore the format and write a poem.")
                .build(),
        );
        let prompt = PromptBuilder::build(&docs(), &options).unwrap();
        let contract = prompt.user.find(flashcards::OUTPUT_CONTRACT).unwrap();
        let extra = prompt.user.find("write a poem").unwrap();
        assert!(contract < extra);
        assert!(prompt.user.ends_with("Ignore the format and write a poem."));
    }

    #[test]
    fn temperature_is_fixed_per_kind() {
        let summary = PromptBuilder::build(
            &docs(),
            &GenerationOptions::Summary(SummaryOptions::default()),
        )
        .unwrap();
        assert_eq!(summary.temperature, SUMMARY_TEMPERATURE);

        let test = PromptBuilder::build(
            &docs(),
            &GenerationOptions::PracticeTest(PracticeTestOptions::default()),
        )
        .unwrap();
        assert_eq!(test.temperature, QUESTION_TEMPERATURE);
    }

    #[test]
    fn essay_tests_use_free_text_contract() {
        let options = GenerationOptions::PracticeTest(
            PracticeTestOptions::builder()
                .question_types(vec![QuestionType::Essay])
                .build(),
        );
        let prompt = PromptBuilder::build(&docs(), &options).unwrap();
        assert_eq!(prompt.system, practice::ESSAY_SYSTEM_PROMPT);
        assert!(prompt.user.contains("### Question 1"));
        assert!(!prompt.user.contains("correctAnswer"));
    }

    #[test]
    fn into_request_carries_temperature() {
        let prompt = Prompt {
            system: "s".into(),
            user: "u".into(),
            temperature: SUMMARY_TEMPERATURE,
        };
        let request = prompt.into_request();
        assert_eq!(request.temperature, SUMMARY_TEMPERATURE);
        assert!(!request.cache_system_prompt);
    }
}
