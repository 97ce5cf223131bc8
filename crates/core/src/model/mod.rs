mod bank;
mod cohort;
mod ids;
mod mode;
mod paper;
mod question;

pub use ids::{CohortId, PaperId, ParseIdError, QuestionId};

pub use bank::{BankError, QuestionBank};
pub use cohort::{Cohort, CohortError};
pub use mode::{ParseModeError, QuizMode};
pub use paper::{PaperError, QuestionPaper};
pub use question::{Question, QuestionDraft, QuestionError};
