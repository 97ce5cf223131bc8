use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::mode::QuizMode;
use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question {id} appears more than once in the {mode} sequence")]
    DuplicateId { id: QuestionId, mode: QuizMode },

    #[error("question {0} appears in both the practice and timed sequences")]
    SharedId(QuestionId),
}

/// The practice and timed question sequences for one cohort.
///
/// Sequences are shared so sessions can bind them without copying; a session
/// never observes a change to the questions it was created with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionBank {
    practice: Arc<[Question]>,
    timed: Arc<[Question]>,
}

impl QuestionBank {
    /// Build a bank from the two ordered sequences.
    ///
    /// # Errors
    ///
    /// Returns `BankError::DuplicateId` when an id repeats inside a sequence and
    /// `BankError::SharedId` when an id is used by both sequences.
    pub fn new(practice: Vec<Question>, timed: Vec<Question>) -> Result<Self, BankError> {
        let practice_ids = unique_ids(&practice, QuizMode::Practice)?;
        unique_ids(&timed, QuizMode::Timed)?;

        if let Some(shared) = timed
            .iter()
            .map(Question::id)
            .find(|id| practice_ids.contains(id))
        {
            return Err(BankError::SharedId(shared));
        }

        Ok(Self {
            practice: practice.into(),
            timed: timed.into(),
        })
    }

    /// The sequence bound to `mode`.
    #[must_use]
    pub fn questions(&self, mode: QuizMode) -> Arc<[Question]> {
        match mode {
            QuizMode::Practice => Arc::clone(&self.practice),
            QuizMode::Timed => Arc::clone(&self.timed),
        }
    }

    #[must_use]
    pub fn len(&self, mode: QuizMode) -> usize {
        match mode {
            QuizMode::Practice => self.practice.len(),
            QuizMode::Timed => self.timed.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.practice.is_empty() && self.timed.is_empty()
    }

    /// Practice and timed questions together, practice first.
    pub fn iter_all(&self) -> impl Iterator<Item = (QuizMode, &Question)> {
        self.practice
            .iter()
            .map(|q| (QuizMode::Practice, q))
            .chain(self.timed.iter().map(|q| (QuizMode::Timed, q)))
    }
}

fn unique_ids(questions: &[Question], mode: QuizMode) -> Result<HashSet<QuestionId>, BankError> {
    let mut ids = HashSet::with_capacity(questions.len());
    for question in questions {
        if !ids.insert(question.id()) {
            return Err(BankError::DuplicateId {
                id: question.id(),
                mode,
            });
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::QuestionDraft;

    fn question(id: u64) -> Question {
        QuestionDraft {
            id: QuestionId::new(id),
            prompt: format!("Q{id}"),
            options: vec!["a".into(), "b".into()],
            answer: "a".into(),
            explanation: String::new(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn bank_binds_sequences_by_mode() {
        let bank = QuestionBank::new(vec![question(1), question(2)], vec![question(3)]).unwrap();
        assert_eq!(bank.len(QuizMode::Practice), 2);
        assert_eq!(bank.len(QuizMode::Timed), 1);
        assert_eq!(bank.questions(QuizMode::Timed)[0].id(), QuestionId::new(3));
        assert_eq!(bank.iter_all().count(), 3);
    }

    #[test]
    fn duplicate_within_sequence_is_rejected() {
        let err = QuestionBank::new(vec![question(1), question(1)], Vec::new()).unwrap_err();
        assert_eq!(
            err,
            BankError::DuplicateId {
                id: QuestionId::new(1),
                mode: QuizMode::Practice
            }
        );
    }

    #[test]
    fn sequences_must_be_disjoint() {
        let err = QuestionBank::new(vec![question(1)], vec![question(1)]).unwrap_err();
        assert_eq!(err, BankError::SharedId(QuestionId::new(1)));
    }

    #[test]
    fn sessions_share_the_same_allocation() {
        let bank = QuestionBank::new(vec![question(1)], Vec::new()).unwrap();
        let a = bank.questions(QuizMode::Practice);
        let b = bank.questions(QuizMode::Practice);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
