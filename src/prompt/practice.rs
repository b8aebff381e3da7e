use crate::types::{Difficulty, PracticeTestOptions, QuestionType};

pub(super) const SYSTEM_PROMPT: &str = "You are an experienced examiner who writes \
practice test questions from study material. Every question has exactly one correct \
answer that is supported by the material, and the wrong options are plausible but \
clearly wrong to someone who studied. Never invent facts the material does not support.";

pub(super) const ESSAY_SYSTEM_PROMPT: &str = "You are an experienced examiner who writes \
open-ended essay questions from study material. Questions require the student to explain, \
compare, or argue using the material, and each comes with guidance on what a strong \
answer covers.";

pub(super) const OUTPUT_CONTRACT: &str = "Output format: respond with ONLY a JSON array. \
Each element is an object with these fields: \"question\" (string), \"options\" (array of \
2 to 6 strings), \"correctAnswer\" (string, copied exactly from one entry of \"options\"), \
and \"explanation\" (string, may be omitted when explanations are not requested). \
For true/false questions use the options [\"True\", \"False\"]. \
Do not add commentary before or after the array.";

pub(super) const ESSAY_OUTPUT_CONTRACT: &str = "Output format: markdown text. Start each \
question with a heading line of the form \"### Question 1\", \"### Question 2\", and so on. \
Under each heading write the question, then a line starting with \"**Key points:**\" \
followed by a bullet list of what a strong answer covers. Write nothing before the first \
heading.";

pub(super) fn task(options: &PracticeTestOptions) -> String {
    let types = options.normalized_question_types();
    let count = match options.number_of_questions {
        Some(n) => n.to_string(),
        None => "between 5 and 10".to_string(),
    };

    let mut task = if options.is_essay() {
        format!("Write {count} essay questions about the study material above.")
    } else {
        let names: Vec<&str> = types.iter().map(|t| question_type_name(*t)).collect();
        format!(
            "Write {count} practice test questions about the study material above. \
             Use only these question types: {}.",
            names.join(", ")
        )
    };

    if let Some(difficulty) = options.difficulty {
        task.push(' ');
        task.push_str(match difficulty {
            Difficulty::Easy => "Questions should be easy and test direct recall.",
            Difficulty::Medium => "Questions should be of medium difficulty.",
            Difficulty::Hard => "Questions should be hard and test deeper understanding.",
        });
    }

    if !options.is_essay() {
        task.push(' ');
        task.push_str(if options.include_explanations {
            "Include a one or two sentence explanation of why the correct answer is right."
        } else {
            "Do not include explanations."
        });
    }
    task
}

fn question_type_name(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::MultipleChoice => "multiple choice",
        QuestionType::TrueFalse => "true/false",
        QuestionType::Essay => "essay",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_requested_question_types() {
        let options = PracticeTestOptions::builder()
            .number_of_questions(7)
            .question_types(vec![QuestionType::TrueFalse, QuestionType::MultipleChoice])
            .include_explanations(true)
            .build();
        let task = task(&options);
        assert!(task.contains("Write 7 practice test questions"));
        assert!(task.contains("true/false, multiple choice"));
        assert!(task.contains("explanation"));
    }

    #[test]
    fn defaults_to_multiple_choice() {
        let task = task(&PracticeTestOptions::default());
        assert!(task.contains("Use only these question types: multiple choice."));
        assert!(task.contains("Do not include explanations."));
    }
}
