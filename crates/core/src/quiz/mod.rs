//! Quiz session state machine.

mod engine;
mod session;
mod snapshot;
mod summary;

pub use engine::QuizEngine;
pub use session::{
    CompletionReason, Direction, Phase, QuizSession, SPRINT_DURATION_SECS, SessionGeneration,
    TickOutcome,
};
pub use snapshot::{NavigatorCell, OptionView, QuestionView, QuizSnapshot};
pub use summary::QuizSummary;
