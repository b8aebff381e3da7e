use crate::types::{SummaryFormat, SummaryLength, SummaryOptions};

pub(super) const SYSTEM_PROMPT: &str = "You are an expert at condensing study material \
into clear, accurate summaries for students. Keep the material's terminology, preserve \
its key facts and their relationships, and leave out anything the material does not say.";

pub(super) const OUTPUT_CONTRACT: &str = "Output format: markdown text. The first line is \
a title of the form \"# <title>\". Use \"## \" headings for major sections. Do not wrap \
the summary in a code block and do not add commentary before the title or after the \
summary.";

pub(super) fn task(options: &SummaryOptions) -> String {
    let length = match options.length {
        SummaryLength::Short => "Keep it short: about 150 words covering only the main ideas.",
        SummaryLength::Medium => "Aim for a medium length of about 300 to 500 words.",
        SummaryLength::Long => {
            "Write a long, detailed summary of about 800 to 1200 words that covers every major topic."
        }
    };
    let format = match options.format {
        SummaryFormat::Paragraphs => "Write the body as prose paragraphs.",
        SummaryFormat::BulletPoints => "Write the body as concise bullet points under each heading.",
        SummaryFormat::Outline => {
            "Write the body as a hierarchical outline with nested bullet points."
        }
    };
    format!("Summarize the study material above. {length} {format}")
}
