use crate::models::{Difficulty, Question};

use super::sentences;

pub const DEFAULT_QUESTION_COUNT: usize = 5;
const DISTRACTORS: usize = 3;
const EXPLANATION: &str = "Taken from the scraped article paragraphs.";

/// Build up to `count` questions from the first quiz-worthy sentences of `full_text`.
///
/// Pure: the same input always yields the same questions, with the correct
/// answer first. Fewer candidates than `count` means fewer questions.
pub fn synthesize(full_text: &str, title: &str, count: usize) -> Vec<Question> {
    sentences::candidates(full_text)
        .into_iter()
        .take(count)
        .map(|sentence| build_question(sentence, title))
        .collect()
}

fn build_question(sentence: &str, title: &str) -> Question {
    let mut options = Vec::with_capacity(DISTRACTORS + 1);
    options.push(sentence.to_string());
    options.extend((0..DISTRACTORS).map(|j| truncated(sentence, (6 - j).max(4))));

    Question {
        prompt: format!(
            "According to the article, which of the following statements about \"{}\" is correct?",
            title
        ),
        options,
        answer: sentence.to_string(),
        explanation: EXPLANATION.to_string(),
        difficulty: Difficulty::Medium,
    }
}

/// First `tokens` words of `sentence` with an ellipsis appended.
fn truncated(sentence: &str, tokens: usize) -> String {
    let head: Vec<&str> = sentence.split_whitespace().take(tokens).collect();
    format!("{}...", head.join(" "))
}

// ── Tests ──
