//! Prompt assembly through the public builder.

use lectern::error::LecternError;
use lectern::prompt::{PromptBuilder, QUESTION_TEMPERATURE};
use lectern::types::*;

fn docs() -> Vec<SourceDocument> {
    vec![SourceDocument::new("history.txt", "The Treaty of Westphalia was signed in 1648.")]
}

#[test]
fn explicit_card_count_appears_in_user_prompt() {
    let request = GenerationRequest::flashcards(
        docs(),
        FlashcardOptions::builder().number_of_cards(12).build(),
    );
    let prompt = PromptBuilder::build_request(&request).unwrap();

    assert!(prompt.user.contains("12"));
    assert!(!prompt.user.contains("between 10 and 20"));
    assert_eq!(prompt.temperature, QUESTION_TEMPERATURE);
}

#[test]
fn prompts_are_deterministic() {
    let options = GenerationOptions::PracticeTest(
        PracticeTestOptions::builder()
            .number_of_questions(5)
            .difficulty(Difficulty::Medium)
            .build(),
    );
    let first = PromptBuilder::build(&docs(), &options).unwrap();
    let second = PromptBuilder::build(&docs(), &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn system_prompt_is_independent_of_source() {
    let options = GenerationOptions::Summary(SummaryOptions::default());
    let a = PromptBuilder::build(&docs(), &options).unwrap();
    let b = PromptBuilder::build(&[SourceDocument::new("x.txt", "Other text")], &options).unwrap();
    assert_eq!(a.system, b.system);
    assert_ne!(a.user, b.user);
}

#[test]
fn blank_sources_are_no_content() {
    let options = GenerationOptions::Summary(SummaryOptions::default());
    let err = PromptBuilder::build(&[SourceDocument::new("empty.txt", "\n\t ")], &options)
        .unwrap_err();
    assert!(matches!(err, LecternError::NoContent));
}
