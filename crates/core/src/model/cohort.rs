use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::bank::QuestionBank;
use crate::model::ids::{CohortId, PaperId};
use crate::model::mode::QuizMode;
use crate::model::paper::QuestionPaper;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CohortError {
    #[error("cohort name cannot be empty")]
    EmptyName,
    #[error("paper {0} appears more than once")]
    DuplicatePaper(PaperId),
}

/// A grade cohort: its static resources plus the question bank quizzes run on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cohort {
    id: CohortId,
    name: String,
    summary: String,
    focus_areas: Vec<String>,
    papers: Vec<QuestionPaper>,
    bank: QuestionBank,
}

impl Cohort {
    /// # Errors
    ///
    /// Returns `CohortError::EmptyName` if the name is blank.
    /// Returns `CohortError::DuplicatePaper` if two papers share an id.
    pub fn new(
        id: CohortId,
        name: impl Into<String>,
        summary: impl Into<String>,
        focus_areas: Vec<String>,
        papers: Vec<QuestionPaper>,
        bank: QuestionBank,
    ) -> Result<Self, CohortError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CohortError::EmptyName);
        }
        let mut seen = BTreeSet::new();
        if let Some(dup) = papers.iter().map(QuestionPaper::id).find(|id| !seen.insert(*id)) {
            return Err(CohortError::DuplicatePaper(dup));
        }
        Ok(Self {
            id,
            name,
            summary: summary.into(),
            focus_areas,
            papers,
            bank,
        })
    }

    #[must_use]
    pub fn id(&self) -> CohortId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn focus_areas(&self) -> &[String] {
        &self.focus_areas
    }

    #[must_use]
    pub fn papers(&self) -> &[QuestionPaper] {
        &self.papers
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Returns a copy of this cohort bound to a different bank.
    #[must_use]
    pub fn with_bank(mut self, bank: QuestionBank) -> Self {
        self.bank = bank;
        self
    }

    /// Total number of quiz questions across both modes.
    #[must_use]
    pub fn quiz_count(&self) -> usize {
        QuizMode::ALL.iter().map(|mode| self.bank.len(*mode)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let err = Cohort::new(
            CohortId::new(9),
            " ",
            "",
            Vec::new(),
            Vec::new(),
            QuestionBank::default(),
        )
        .unwrap_err();
        assert_eq!(err, CohortError::EmptyName);
    }

    #[test]
    fn paper_ids_are_unique_within_a_cohort() {
        let paper = |title: &str| {
            QuestionPaper::new(
                PaperId::new(901),
                "Mathematics",
                2023,
                title,
                "",
                "https://papers.facebond.example/grade-9/math.pdf",
            )
            .unwrap()
        };
        let err = Cohort::new(
            CohortId::new(9),
            "Grade 9",
            "",
            Vec::new(),
            vec![paper("Term test"), paper("Mock exam")],
            QuestionBank::default(),
        )
        .unwrap_err();
        assert_eq!(err, CohortError::DuplicatePaper(PaperId::new(901)));
    }

    #[test]
    fn empty_bank_counts_zero_quizzes() {
        let cohort = Cohort::new(
            CohortId::new(9),
            "Grade 9",
            "Foundations",
            vec!["Algebra".into()],
            Vec::new(),
            QuestionBank::default(),
        )
        .unwrap();
        assert_eq!(cohort.quiz_count(), 0);
        assert_eq!(cohort.name(), "Grade 9");
    }
}
