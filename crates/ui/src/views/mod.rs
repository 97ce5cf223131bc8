mod board;
mod grade_selector;
mod home;
mod papers;
mod quiz_panel;
mod state;

pub use board::QuizBoard;
pub use grade_selector::GradeSelector;
pub use home::{BoardData, HomeView};
pub use papers::PaperDeck;
pub use quiz_panel::QuizPanel;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
