//! CLI entry point for Lectern.

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::ProviderKind;
use crate::types::{
    ArtifactKind, Difficulty, FlashcardOptions, GenerationOptions, PracticeTestOptions,
    QuestionType, SummaryFormat, SummaryLength, SummaryOptions,
};

/// Lectern study-artifact generator
#[derive(Parser, Debug)]
#[command(name = "lectern", version, about = "Generate flashcards, practice tests, and summaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an artifact from text files
    Generate(GenerateArgs),
    /// Show today's token usage against the daily budget
    Usage,
}

/// Arguments for `lectern generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Artifact kind (flashcards, practice_test, summary)
    pub kind: ArtifactKind,

    /// Text files to generate from
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Number of cards or questions
    #[arg(short = 'n', long)]
    pub count: Option<u32>,

    /// Difficulty (easy, medium, hard)
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Question type for practice tests; repeatable
    #[arg(long = "question-type")]
    pub question_types: Vec<QuestionType>,

    /// Include explanations in practice tests
    #[arg(long)]
    pub explanations: bool,

    /// Summary length (short, medium, long)
    #[arg(long)]
    pub length: Option<SummaryLength>,

    /// Summary format (paragraphs, bullet_points, outline)
    #[arg(long)]
    pub format: Option<SummaryFormat>,

    /// Extra instructions appended to the prompt
    #[arg(short, long)]
    pub instructions: Option<String>,

    /// Provider to prefer over the configured default
    #[arg(short, long)]
    pub provider: Option<ProviderKind>,
}

impl GenerateArgs {
    /// Typed options for the requested kind. Flags that do not apply are ignored.
    pub fn options(&self) -> GenerationOptions {
        match self.kind {
            ArtifactKind::Flashcards => GenerationOptions::Flashcards(FlashcardOptions {
                number_of_cards: self.count,
                difficulty: self.difficulty,
                extra_instructions: self.instructions.clone(),
            }),
            ArtifactKind::PracticeTest => GenerationOptions::PracticeTest(PracticeTestOptions {
                number_of_questions: self.count,
                difficulty: self.difficulty,
                question_types: self.question_types.clone(),
                include_explanations: self.explanations,
                extra_instructions: self.instructions.clone(),
            }),
            ArtifactKind::Summary => GenerationOptions::Summary(SummaryOptions {
                length: self.length.unwrap_or_default(),
                format: self.format.unwrap_or_default(),
                extra_instructions: self.instructions.clone(),
            }),
        }
    }
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_flashcards() {
        let cli = Cli::try_parse_from([
            "lectern", "generate", "flashcards", "notes.txt", "-n", "12", "-d", "hard",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.kind, ArtifactKind::Flashcards);
                assert_eq!(args.files, vec![PathBuf::from("notes.txt")]);
                assert_eq!(
                    args.options(),
                    GenerationOptions::Flashcards(FlashcardOptions {
                        number_of_cards: Some(12),
                        difficulty: Some(Difficulty::Hard),
                        extra_instructions: None,
                    })
                );
            }
            other => panic!("expected Generate, got {other:?}"),
        }
    }

    #[test]
    fn parse_generate_practice_test_with_types() {
        let cli = Cli::try_parse_from([
            "lectern",
            "generate",
            "practice_test",
            "a.txt",
            "b.txt",
            "--question-type",
            "true_false",
            "--question-type",
            "multiple_choice",
            "--explanations",
            "--provider",
            "google",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate");
        };
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.provider, Some(ProviderKind::Gemini));
        let GenerationOptions::PracticeTest(opts) = args.options() else {
            panic!("expected practice test options");
        };
        assert_eq!(
            opts.question_types,
            vec![QuestionType::TrueFalse, QuestionType::MultipleChoice]
        );
        assert!(opts.include_explanations);
    }

    #[test]
    fn parse_usage() {
        let cli = Cli::try_parse_from(["lectern", "usage"]).unwrap();
        assert!(matches!(cli.command, Commands::Usage));
    }

    #[test]
    fn generate_requires_files() {
        assert!(Cli::try_parse_from(["lectern", "generate", "summary"]).is_err());
    }

    #[test]
    fn unknown_kind_is_error() {
        assert!(Cli::try_parse_from(["lectern", "generate", "quiz", "a.txt"]).is_err());
    }
}
