//! Lectern: metered, multi-provider generation of study artifacts.
//!
//! Turns extracted document text into flashcards, practice tests, and
//! summaries by calling one of several interchangeable LLM backends, while
//! enforcing a daily token budget and validating the model's output.
//!
//! # Quick Start
//!
//! ```no_run
//! use lectern::prelude::*;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> lectern::error::Result<()> {
//! let config = LecternConfig::from_env()?;
//! let service = GenerationService::from_config(&config);
//!
//! let request = GenerationRequest::flashcards(
//!     vec![SourceDocument::new("biology.pdf", "Cells are the basic unit of life...")],
//!     FlashcardOptions::builder().number_of_cards(12).build(),
//! );
//! let artifact = service
//!     .generate_flashcards(&request, &CancellationToken::new())
//!     .await?;
//! println!("{} ({} cards)", artifact.title, artifact.content.item_count());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod ledger;
pub mod models;
pub mod parse;
pub mod prelude;
pub mod prompt;
pub mod provider;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
