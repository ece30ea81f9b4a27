pub mod sentences;
pub mod shuffle;
pub mod synth;

pub use shuffle::shuffled;
pub use synth::{synthesize, DEFAULT_QUESTION_COUNT};
