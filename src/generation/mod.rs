//! The generation use-cases: one call in, one validated artifact out.

mod service;
mod title;

pub use service::GenerationService;
pub use title::derive_title;
