use std::path::Path;

use crate::types::{ArtifactKind, SourceDocument};

/// Title for a new artifact: the kind label plus the first source's file stem,
/// e.g. `Flashcards: biology` or `Summary: biology and 2 more`.
pub fn derive_title(kind: ArtifactKind, documents: &[SourceDocument]) -> String {
    let names: Vec<&str> = documents
        .iter()
        .filter(|doc| doc.usable_text().is_some())
        .map(|doc| {
            Path::new(&doc.file_name)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .filter(|stem| !stem.trim().is_empty())
                .unwrap_or(doc.file_name.as_str())
        })
        .collect();

    match names.as_slice() {
        [] => kind.label().to_string(),
        [only] => format!("{}: {}", kind.label(), only),
        [first, rest @ ..] => format!("{}: {} and {} more", kind.label(), first, rest.len()),
    }
}
