use crate::types::{Difficulty, FlashcardOptions};

pub(super) const SYSTEM_PROMPT: &str = "You are an experienced teacher who writes \
flashcards for active recall. Each card tests exactly one fact, definition, or concept \
taken from the study material. Questions are specific and self-contained; answers are \
short and correct according to the material. Never invent facts the material does not \
support.";

pub(super) const OUTPUT_CONTRACT: &str = "Output format: respond with ONLY a JSON array. \
Each element is an object with exactly two string fields, \"question\" and \"answer\". \
Do not wrap the array in an object, do not add commentary before or after it, and do not \
repeat a question.\n\
Example: [{\"question\": \"What is the powerhouse of the cell?\", \"answer\": \"The mitochondrion\"}]";

pub(super) fn task(options: &FlashcardOptions) -> String {
    let count = match options.number_of_cards {
        Some(n) => n.to_string(),
        None => "between 10 and 20".to_string(),
    };
    let mut task = format!("Create {count} flashcards from the study material above.");
    if let Some(difficulty) = options.difficulty {
        task.push(' ');
        task.push_str(difficulty_wording(difficulty));
    }
    task
}

fn difficulty_wording(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => {
            "Keep them easy: focus on key terms, definitions, and facts stated directly in the text."
        }
        Difficulty::Medium => {
            "Aim for medium difficulty: mix recall of facts with questions about how concepts relate."
        }
        Difficulty::Hard => {
            "Make them hard: ask about applications, comparisons, and consequences that require \
             understanding rather than recall."
        }
    }
}
