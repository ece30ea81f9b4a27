use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Question;

/// Copy of `questions` with each option list independently permuted.
/// The input is left untouched.
pub fn shuffled(questions: &[Question]) -> Vec<Question> {
    shuffled_with(questions, &mut rand::thread_rng())
}

pub fn shuffled_with<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<Question> {
    questions
        .iter()
        .map(|q| {
            let mut view = q.clone();
            view.options.shuffle(rng);
            view
        })
        .collect()
}

// ── Tests ──
