//! Turning raw model output into validated artifacts.
//!
//! The only repair attempted is stripping one fenced-code-block wrapper.
//! Structured shapes drop individual invalid items but fail when nothing
//! survives; ordering is always the item's position after filtering.

mod fence;

pub use fence::strip_fences;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ParseError;
use crate::types::{
    ArtifactContent, Flashcard, FlashcardSet, FreeText, OutputShape, PracticeQuestion,
    PracticeQuestionSet,
};

/// Allowed number of options on a multiple-choice item.
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

type ParseResult<T> = std::result::Result<T, ParseError>;

pub struct ResponseParser;

impl ResponseParser {
    /// Parse `raw` according to the shape the prompt asked for.
    pub fn parse(shape: OutputShape, raw: &str) -> ParseResult<ArtifactContent> {
        match shape {
            OutputShape::Flashcards => Self::parse_flashcards(raw).map(ArtifactContent::Flashcards),
            OutputShape::MultipleChoice => {
                Self::parse_multiple_choice(raw).map(ArtifactContent::PracticeQuestions)
            }
            OutputShape::Essay => Self::parse_free_text(raw).map(ArtifactContent::Essay),
            OutputShape::Summary => Self::parse_free_text(raw).map(ArtifactContent::Summary),
        }
    }

    pub fn parse_flashcards(raw: &str) -> ParseResult<FlashcardSet> {
        let items = parse_array(raw)?;
        let total = items.len();
        let mut cards: Vec<Flashcard> = Vec::with_capacity(total);

        for item in &items {
            let Some(obj) = item.as_object() else { continue };
            let (Some(question), Some(answer)) =
                (non_empty_str(obj, "question"), non_empty_str(obj, "answer"))
            else {
                continue;
            };
            if cards.iter().any(|card| card.question == question) {
                continue;
            }
            cards.push(Flashcard {
                order: cards.len(),
                question: question.to_string(),
                answer: answer.to_string(),
            });
        }

        if cards.is_empty() {
            return Err(ParseError::EmptySet);
        }
        debug!(total, kept = cards.len(), "Parsed flashcards");
        Ok(FlashcardSet { cards })
    }

    pub fn parse_multiple_choice(raw: &str) -> ParseResult<PracticeQuestionSet> {
        let items = parse_array(raw)?;
        let total = items.len();
        let mut questions: Vec<PracticeQuestion> = Vec::with_capacity(total);

        for item in &items {
            let Some(obj) = item.as_object() else { continue };
            let Some(question) = non_empty_str(obj, "question") else {
                continue;
            };
            let Some(options) = option_list(obj) else {
                continue;
            };
            let Some(correct) = non_empty_str(obj, "correctAnswer") else {
                continue;
            };

            let index = questions.len();
            let Some(correct_answer) = options.iter().find(|opt| opt.as_str() == correct).cloned()
            else {
                return Err(ParseError::SchemaViolation {
                    index,
                    message: format!("correctAnswer {correct:?} does not match any option"),
                });
            };

            questions.push(PracticeQuestion {
                order: index,
                question: question.to_string(),
                options,
                correct_answer,
                explanation: non_empty_str(obj, "explanation").map(str::to_string),
            });
        }

        if questions.is_empty() {
            return Err(ParseError::EmptySet);
        }
        debug!(total, kept = questions.len(), "Parsed multiple-choice questions");
        Ok(PracticeQuestionSet { questions })
    }

    /// Free text is kept verbatim after cleaning; it only has to be non-empty.
    pub fn parse_free_text(raw: &str) -> ParseResult<FreeText> {
        let text = strip_fences(raw);
        if text.is_empty() {
            return Err(ParseError::EmptySet);
        }
        Ok(FreeText {
            text: text.to_string(),
        })
    }
}

fn parse_array(raw: &str) -> ParseResult<Vec<Value>> {
    let cleaned = strip_fences(raw);
    if cleaned.is_empty() {
        return Err(ParseError::Unparsable("output is empty".into()));
    }
    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(ParseError::Unparsable(format!(
            "expected a JSON array, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(ParseError::Unparsable(e.to_string())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Case-insensitive field lookup; an exact match wins.
fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name).or_else(|| {
        obj.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn non_empty_str<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    field(obj, name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Trimmed option texts, or `None` if any is blank or the count is out of range.
fn option_list(obj: &Map<String, Value>) -> Option<Vec<String>> {
    let raw = field(obj, "options")?.as_array()?;
    if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&raw.len()) {
        return None;
    }
    raw.iter()
        .map(|opt| {
            opt.as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicate_flashcards_keep_first() {
        let raw = r#"[
            {"question": "What is DNA?", "answer": "A molecule"},
            {"question": " What is DNA? ", "answer": "Something else"},
            {"question": "What is RNA?", "answer": "Another molecule"}
        ]"#;
        let set = ResponseParser::parse_flashcards(raw).unwrap();
        let questions: Vec<_> = set.cards.iter().map(|c| c.question.as_str()).collect();
        assert_eq!(questions, vec!["What is DNA?", "What is RNA?"]);
        assert_eq!(set.cards[0].answer, "A molecule");
    }

    #[test]
    fn field_names_match_case_insensitively() {
        let raw = r#"[{"Question": "Q", "ANSWER": "A"}]"#;
        let set = ResponseParser::parse_flashcards(raw).unwrap();
        assert_eq!(set.cards[0].question, "Q");
        assert_eq!(set.cards[0].answer, "A");
    }

    #[test]
    fn non_array_output_is_unparsable() {
        let err = ResponseParser::parse_flashcards(r#"{"cards": []}"#).unwrap_err();
        assert!(matches!(err, ParseError::Unparsable(ref m) if m.contains("object")), "{err:?}");

        let err = ResponseParser::parse_flashcards("Sure! Here are your flashcards").unwrap_err();
        assert!(matches!(err, ParseError::Unparsable(_)));
    }

    #[test]
    fn all_items_invalid_is_empty_set() {
        let raw = r#"[{"question": "", "answer": "A"}, {"answer": "B"}, 7]"#;
        assert_eq!(ResponseParser::parse_flashcards(raw).unwrap_err(), ParseError::EmptySet);
        assert_eq!(ResponseParser::parse_flashcards("[]").unwrap_err(), ParseError::EmptySet);
    }

    #[test]
    fn options_out_of_range_drop_the_item() {
        let raw = r#"[
            {"question": "One option", "options": ["A"], "correctAnswer": "A"},
            {"question": "Blank option", "options": ["A", " "], "correctAnswer": "A"},
            {"question": "Fine", "options": ["Yes", "No"], "correctAnswer": "No", "explanation": " "}
        ]"#;
        let set = ResponseParser::parse_multiple_choice(raw).unwrap();
        assert_eq!(set.questions.len(), 1);
        assert_eq!(set.questions[0].order, 0);
        assert_eq!(set.questions[0].correct_answer, "No");
        assert_eq!(set.questions[0].explanation, None);
    }

    #[test]
    fn schema_violation_reports_filtered_index() {
        let raw = r#"[
            {"question": "", "options": ["A", "B"], "correctAnswer": "A"},
            {"question": "Q1", "options": ["A", "B"], "correctAnswer": "A"},
            {"question": "Q2", "options": ["A", "B"], "correctAnswer": "C"}
        ]"#;
        match ResponseParser::parse_multiple_choice(raw).unwrap_err() {
            ParseError::SchemaViolation { index, .. } => assert_eq!(index, 1),
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn free_text_is_trimmed_and_unfenced() {
        let text = ResponseParser::parse_free_text("```markdown\n# Title\n\nBody\n```\n").unwrap();
        assert_eq!(text.text, "# Title\n\nBody");
        assert_eq!(
            ResponseParser::parse_free_text("  \n ").unwrap_err(),
            ParseError::EmptySet
        );
    }

    #[test]
    fn parse_dispatches_on_shape() {
        let content = ResponseParser::parse(OutputShape::Summary, "# Summary").unwrap();
        assert!(matches!(content, ArtifactContent::Summary(_)));
        let content = ResponseParser::parse(OutputShape::Essay, "### Question 1\nWhy?").unwrap();
        assert!(matches!(content, ArtifactContent::Essay(_)));
    }
}
