//! Generation requests, per-kind options, and their validation.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::source::SourceDocument;
use crate::error::{LecternError, Result};

/// Upper bound for requested flashcard/question counts.
pub const MAX_ITEM_COUNT: u32 = 50;

/// Upper bound (in characters) for caller-supplied extra instructions.
pub const MAX_EXTRA_INSTRUCTIONS_CHARS: usize = 500;

/// The kind of study artifact to generate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ArtifactKind {
    Flashcards,
    PracticeTest,
    Summary,
}

impl ArtifactKind {
    /// Human-facing label used in derived titles.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flashcards => "Flashcards",
            Self::PracticeTest => "Practice Test",
            Self::Summary => "Summary",
        }
    }
}

/// The machine-parsable shape the model is instructed to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputShape {
    /// JSON array of `{question, answer}` objects.
    Flashcards,
    /// JSON array of `{question, options, correctAnswer, explanation?}` objects.
    MultipleChoice,
    /// Free text with `### Question N` markers.
    Essay,
    /// Free markdown text with a `# ` title line.
    Summary,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Essay,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SummaryFormat {
    #[default]
    Paragraphs,
    BulletPoints,
    Outline,
}

/// Options for flashcard generation.
#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FlashcardOptions {
    pub number_of_cards: Option<u32>,
    pub difficulty: Option<Difficulty>,
    #[builder(into)]
    pub extra_instructions: Option<String>,
}

/// Options for practice test generation.
#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PracticeTestOptions {
    pub number_of_questions: Option<u32>,
    pub difficulty: Option<Difficulty>,
    /// Empty means multiple choice only.
    #[builder(default)]
    pub question_types: Vec<QuestionType>,
    #[builder(default)]
    pub include_explanations: bool,
    #[builder(into)]
    pub extra_instructions: Option<String>,
}

impl PracticeTestOptions {
    /// Requested question types, de-duplicated in first-appearance order.
    pub fn normalized_question_types(&self) -> Vec<QuestionType> {
        let mut types = Vec::with_capacity(self.question_types.len());
        for qt in &self.question_types {
            if !types.contains(qt) {
                types.push(*qt);
            }
        }
        if types.is_empty() {
            types.push(QuestionType::MultipleChoice);
        }
        types
    }

    /// Whether this test asks for free-text essay questions.
    pub fn is_essay(&self) -> bool {
        self.question_types.contains(&QuestionType::Essay)
    }
}

/// Options for summary generation.
#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SummaryOptions {
    #[builder(default)]
    pub length: SummaryLength,
    #[builder(default)]
    pub format: SummaryFormat,
    #[builder(into)]
    pub extra_instructions: Option<String>,
}

/// Per-kind options. The variant determines the artifact kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOptions {
    Flashcards(FlashcardOptions),
    PracticeTest(PracticeTestOptions),
    Summary(SummaryOptions),
}

impl GenerationOptions {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Flashcards(_) => ArtifactKind::Flashcards,
            Self::PracticeTest(_) => ArtifactKind::PracticeTest,
            Self::Summary(_) => ArtifactKind::Summary,
        }
    }

    pub fn output_shape(&self) -> OutputShape {
        match self {
            Self::Flashcards(_) => OutputShape::Flashcards,
            Self::PracticeTest(opts) if opts.is_essay() => OutputShape::Essay,
            Self::PracticeTest(_) => OutputShape::MultipleChoice,
            Self::Summary(_) => OutputShape::Summary,
        }
    }

    pub fn extra_instructions(&self) -> Option<&str> {
        match self {
            Self::Flashcards(o) => o.extra_instructions.as_deref(),
            Self::PracticeTest(o) => o.extra_instructions.as_deref(),
            Self::Summary(o) => o.extra_instructions.as_deref(),
        }
    }

    /// Build typed options from an untyped JSON object supplied by the API layer.
    ///
    /// `null` yields the defaults for `kind`. Unknown fields and values outside
    /// an option's domain are validation errors.
    pub fn from_json(kind: ArtifactKind, value: serde_json::Value) -> Result<Self> {
        let value = if value.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            value
        };
        let invalid = |e: serde_json::Error| LecternError::Validation(format!("{kind} options: {e}"));
        let options = match kind {
            ArtifactKind::Flashcards => Self::Flashcards(serde_json::from_value(value).map_err(invalid)?),
            ArtifactKind::PracticeTest => {
                Self::PracticeTest(serde_json::from_value(value).map_err(invalid)?)
            }
            ArtifactKind::Summary => Self::Summary(serde_json::from_value(value).map_err(invalid)?),
        };
        options.validate()?;
        Ok(options)
    }

    /// Check bounds that the types alone cannot express.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Flashcards(o) => {
                check_count("numberOfCards", o.number_of_cards)?;
            }
            Self::PracticeTest(o) => {
                check_count("numberOfQuestions", o.number_of_questions)?;
                let types = o.normalized_question_types();
                if types.contains(&QuestionType::Essay) && types.len() > 1 {
                    return Err(LecternError::Validation(
                        "essay questions cannot be combined with other question types".into(),
                    ));
                }
            }
            Self::Summary(_) => {}
        }
        if let Some(extra) = self.extra_instructions() {
            let len = extra.chars().count();
            if len > MAX_EXTRA_INSTRUCTIONS_CHARS {
                return Err(LecternError::Validation(format!(
                    "extraInstructions is {len} characters; the limit is {MAX_EXTRA_INSTRUCTIONS_CHARS}"
                )));
            }
        }
        Ok(())
    }
}

fn check_count(field: &str, count: Option<u32>) -> Result<()> {
    match count {
        Some(n) if n == 0 || n > MAX_ITEM_COUNT => Err(LecternError::Validation(format!(
            "{field} must be between 1 and {MAX_ITEM_COUNT}, got {n}"
        ))),
        _ => Ok(()),
    }
}

/// A request for one artifact generated from one or more source documents.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub documents: Vec<SourceDocument>,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(documents: Vec<SourceDocument>, options: GenerationOptions) -> Self {
        Self { documents, options }
    }

    pub fn flashcards(documents: Vec<SourceDocument>, options: FlashcardOptions) -> Self {
        Self::new(documents, GenerationOptions::Flashcards(options))
    }

    pub fn practice_test(documents: Vec<SourceDocument>, options: PracticeTestOptions) -> Self {
        Self::new(documents, GenerationOptions::PracticeTest(options))
    }

    pub fn summary(documents: Vec<SourceDocument>, options: SummaryOptions) -> Self {
        Self::new(documents, GenerationOptions::Summary(options))
    }

    pub fn kind(&self) -> ArtifactKind {
        self.options.kind()
    }

    pub fn validate(&self) -> Result<()> {
        self.options.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn from_json_accepts_known_values() {
        let options = GenerationOptions::from_json(
            ArtifactKind::PracticeTest,
            json!({
                "numberOfQuestions": 8,
                "difficulty": "hard",
                "questionTypes": ["multiple_choice", "true_false", "multiple_choice"],
                "includeExplanations": true
            }),
        )
        .unwrap();
        let GenerationOptions::PracticeTest(opts) = options else {
            panic!("expected practice test options");
        };
        assert_eq!(opts.difficulty, Some(Difficulty::Hard));
        assert_eq!(
            opts.normalized_question_types(),
            vec![QuestionType::MultipleChoice, QuestionType::TrueFalse]
        );
    }

    #[test]
    fn from_json_rejects_values_outside_domain() {
        let err = GenerationOptions::from_json(
            ArtifactKind::Flashcards,
            json!({"difficulty": "impossible"}),
        )
        .unwrap_err();
        assert!(matches!(err, LecternError::Validation(_)), "{err:?}");

        let err = GenerationOptions::from_json(ArtifactKind::Summary, json!({"tone": "pirate"}))
            .unwrap_err();
        assert!(matches!(err, LecternError::Validation(_)), "{err:?}");
    }

    #[test]
    fn null_options_use_defaults() {
        let options = GenerationOptions::from_json(ArtifactKind::Summary, serde_json::Value::Null)
            .unwrap();
        assert_eq!(options, GenerationOptions::Summary(SummaryOptions::default()));
    }

    #[test]
    fn count_bounds_are_enforced() {
        let zero = GenerationOptions::Flashcards(FlashcardOptions::builder().number_of_cards(0).build());
        assert!(zero.validate().is_err());
        let too_many = GenerationOptions::Flashcards(
            FlashcardOptions::builder().number_of_cards(MAX_ITEM_COUNT + 1).build(),
        );
        assert!(too_many.validate().is_err());
        let ok = GenerationOptions::Flashcards(FlashcardOptions::builder().number_of_cards(12).build());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn essay_is_exclusive() {
        let mixed = GenerationOptions::PracticeTest(
            PracticeTestOptions::builder()
                .question_types(vec![QuestionType::Essay, QuestionType::TrueFalse])
                .build(),
        );
        assert!(mixed.validate().is_err());

        let essay = GenerationOptions::PracticeTest(
            PracticeTestOptions::builder()
                .question_types(vec![QuestionType::Essay])
                .build(),
        );
        assert!(essay.validate().is_ok());
        assert_eq!(essay.output_shape(), OutputShape::Essay);
    }

    #[test]
    fn extra_instructions_are_capped() {
        let long = "x".repeat(MAX_EXTRA_INSTRUCTIONS_CHARS + 1);
        let options =
            GenerationOptions::Summary(SummaryOptions::builder().extra_instructions(long).build());
        assert!(options.validate().is_err());
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!(Difficulty::from_str("EASY").unwrap(), Difficulty::Easy);
        assert_eq!(
            SummaryFormat::from_str("bullet_points").unwrap(),
            SummaryFormat::BulletPoints
        );
        assert!(QuestionType::from_str("matching").is_err());
    }
}
