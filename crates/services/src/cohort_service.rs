use std::sync::Arc;

use rand::rng;
use rand::seq::SliceRandom;
use tracing::debug;

use quiz_core::model::{Cohort, CohortId, Question, QuestionBank, QuizMode};
use storage::repository::CohortRepository;

use crate::error::CohortServiceError;

/// Loads cohorts for the board, optionally shuffling question order.
///
/// Shuffling happens once per load, so a session bound to the returned bank
/// sees a fixed order for its whole life.
#[derive(Clone)]
pub struct CohortService {
    cohorts: Arc<dyn CohortRepository>,
    shuffle: bool,
}

impl CohortService {
    #[must_use]
    pub fn new(cohorts: Arc<dyn CohortRepository>) -> Self {
        Self {
            cohorts,
            shuffle: false,
        }
    }

    /// Enable or disable shuffling of both question sequences on load.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// All cohorts ordered by grade.
    ///
    /// # Errors
    ///
    /// Returns `CohortServiceError::Storage` if repository access fails.
    /// Returns `CohortServiceError::Cohort` if a shuffled bank cannot be rebuilt.
    pub async fn list_cohorts(&self) -> Result<Vec<Cohort>, CohortServiceError> {
        let cohorts = self.cohorts.list_cohorts().await?;
        debug!(count = cohorts.len(), shuffle = self.shuffle, "loaded cohorts");
        cohorts.into_iter().map(|c| self.prepare(c)).collect()
    }

    /// Fetch a cohort by grade.
    ///
    /// # Errors
    ///
    /// Returns `CohortServiceError::NotFound` when no cohort has this id.
    /// Returns `CohortServiceError::Storage` if repository access fails.
    pub async fn get_cohort(&self, id: CohortId) -> Result<Cohort, CohortServiceError> {
        let cohort = self
            .cohorts
            .get_cohort(id)
            .await?
            .ok_or(CohortServiceError::NotFound(id))?;
        self.prepare(cohort)
    }

    fn prepare(&self, cohort: Cohort) -> Result<Cohort, CohortServiceError> {
        if !self.shuffle {
            return Ok(cohort);
        }
        let bank = shuffled(cohort.bank())?;
        Ok(cohort.with_bank(bank))
    }
}

fn shuffled(bank: &QuestionBank) -> Result<QuestionBank, CohortServiceError> {
    let mut rng = rng();
    let mut practice: Vec<Question> = bank.questions(QuizMode::Practice).to_vec();
    let mut timed: Vec<Question> = bank.questions(QuizMode::Timed).to_vec();
    practice.shuffle(&mut rng);
    timed.shuffle(&mut rng);
    let bank = QuestionBank::new(practice, timed).map_err(quiz_core::Error::from)?;
    Ok(bank)
}
