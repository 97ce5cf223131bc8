use async_trait::async_trait;
use quiz_core::model::{
    Cohort, CohortId, Question, QuestionDraft, QuestionError, QuestionId, QuizMode,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a question, including the sequence it belongs to.
///
/// Storage keeps the answer as text so rows stay readable; the domain
/// `Question` re-validates it against the options on the way back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub cohort_id: CohortId,
    pub mode: QuizMode,
    pub position: u32,
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(
        cohort_id: CohortId,
        mode: QuizMode,
        position: u32,
        question: &Question,
    ) -> Self {
        Self {
            cohort_id,
            mode,
            position,
            id: question.id(),
            prompt: question.prompt().to_owned(),
            options: question.options().to_vec(),
            answer: question.answer().to_owned(),
            explanation: question.explanation().to_owned(),
        }
    }

    /// Records for both sequences of a cohort, in sequence order.
    #[must_use]
    pub fn all_for(cohort: &Cohort) -> Vec<Self> {
        let mut records = Vec::new();
        for mode in QuizMode::ALL {
            let questions = cohort.bank().questions(mode);
            for (position, question) in (0_u32..).zip(questions.iter()) {
                records.push(Self::from_question(cohort.id(), mode, position, question));
            }
        }
        records
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the stored row no longer validates.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        QuestionDraft {
            id: self.id,
            prompt: self.prompt,
            options: self.options,
            answer: self.answer,
            explanation: self.explanation,
        }
        .validate()
    }
}

/// Source of cohorts and their question banks.
#[async_trait]
pub trait CohortRepository: Send + Sync {
    /// Persist or replace a cohort together with its questions and papers.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cohort cannot be stored.
    async fn upsert_cohort(&self, cohort: &Cohort) -> Result<(), StorageError>;

    /// Fetch a cohort by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures; a missing cohort is `Ok(None)`.
    async fn get_cohort(&self, id: CohortId) -> Result<Option<Cohort>, StorageError>;

    /// All cohorts ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on adapter failures.
    async fn list_cohorts(&self) -> Result<Vec<Cohort>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    cohorts: Arc<Mutex<BTreeMap<CohortId, Cohort>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CohortRepository for InMemoryRepository {
    async fn upsert_cohort(&self, cohort: &Cohort) -> Result<(), StorageError> {
        let mut guard = self
            .cohorts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(cohort.id(), cohort.clone());
        Ok(())
    }

    async fn get_cohort(&self, id: CohortId) -> Result<Option<Cohort>, StorageError> {
        let guard = self
            .cohorts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_cohorts(&self) -> Result<Vec<Cohort>, StorageError> {
        let guard = self
            .cohorts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().cloned().collect())
    }
}

/// Repositories behind trait objects so the backend can be swapped.
#[derive(Clone)]
pub struct Storage {
    pub cohorts: Arc<dyn CohortRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let cohorts: Arc<dyn CohortRepository> = Arc::new(InMemoryRepository::new());
        Self { cohorts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    #[tokio::test]
    async fn lists_cohorts_in_grade_order() {
        let repo = InMemoryRepository::new();
        let mut catalog = default_catalog().unwrap();
        catalog.reverse();
        for cohort in &catalog {
            repo.upsert_cohort(cohort).await.unwrap();
        }

        let listed = repo.list_cohorts().await.unwrap();
        let grades: Vec<u64> = listed.iter().map(|c| c.id().value()).collect();
        assert_eq!(grades, vec![9, 10, 11, 12]);
    }

    #[tokio::test]
    async fn missing_cohort_is_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_cohort(CohortId::new(7)).await.unwrap().is_none());
    }

    #[test]
    fn question_records_round_trip() {
        let cohort = default_catalog().unwrap().remove(0);
        let records = QuestionRecord::all_for(&cohort);
        assert_eq!(records.len(), cohort.quiz_count());

        let first = records[0].clone();
        assert_eq!(first.mode, QuizMode::Practice);
        assert_eq!(first.position, 0);
        let question = first.into_question().unwrap();
        assert_eq!(question, cohort.bank().questions(QuizMode::Practice)[0]);
    }

    #[test]
    fn tampered_answer_fails_validation() {
        let cohort = default_catalog().unwrap().remove(0);
        let mut record = QuestionRecord::all_for(&cohort).remove(0);
        record.answer = "none of the above".into();
        assert!(matches!(
            record.into_question(),
            Err(QuestionError::AnswerNotInOptions(_))
        ));
    }
}
