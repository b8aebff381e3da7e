use std::sync::OnceLock;

use regex::Regex;

static FENCE: OnceLock<Regex> = OnceLock::new();

fn fence() -> &'static Regex {
    FENCE.get_or_init(|| {
        // A tag only counts when a line break follows it.
        Regex::new(r"(?s)\A```(?:[\w+.\-]+[ \t]*\r?\n|[ \t]*\r?\n?)(.*?)\r?\n?[ \t]*```\z")
            .expect("fence pattern is valid")
    })
}

/// Trim `text` and remove one surrounding fenced-code-block wrapper, with or
/// without a language tag. Nested fences are left alone.
pub fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    match fence().captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}
