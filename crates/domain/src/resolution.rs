mod answer;
mod state;

pub use answer::{Answer, AnswerSet, Resolution};
pub use state::{ResolutionLimits, ResolutionState};
