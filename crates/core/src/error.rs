use thiserror::Error;

use crate::model::{BankError, CohortError, PaperError, QuestionError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Cohort(#[from] CohortError),
    #[error(transparent)]
    Paper(#[from] PaperError),
}
