use serde::Serialize;

use crate::model::{CohortId, QuestionId, QuizMode};

use super::session::{CompletionReason, Phase, QuizSession, SessionGeneration};

/// Everything the presentation layer needs to render one frame of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSnapshot {
    pub generation: SessionGeneration,
    pub cohort_id: CohortId,
    pub mode: QuizMode,
    pub phase: Phase,
    pub started: bool,
    pub completed: bool,
    pub completion: Option<CompletionReason>,
    pub current_index: usize,
    pub total: usize,
    /// `Some` only in timed mode.
    pub remaining_secs: Option<u32>,
    pub score: usize,
    pub answered: usize,
    pub pending: usize,
    pub question: Option<QuestionView>,
    pub navigator: Vec<NavigatorCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<OptionView>,
    /// Revealed once the session is completed.
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub text: String,
    pub selected: bool,
    /// Revealed once the session is completed.
    pub correct: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigatorCell {
    pub index: usize,
    pub answered: bool,
    pub current: bool,
}

impl QuizSnapshot {
    #[must_use]
    pub fn capture(cohort_id: CohortId, session: &QuizSession) -> Self {
        let completed = session.is_completed();
        let current_index = session.current_index();

        let question = session.current_question().map(|q| {
            let chosen = session.selection_at(current_index);
            QuestionView {
                id: q.id(),
                prompt: q.prompt().to_string(),
                options: q
                    .options()
                    .iter()
                    .enumerate()
                    .map(|(index, text)| OptionView {
                        text: text.clone(),
                        selected: chosen == Some(index),
                        correct: completed.then(|| q.is_correct(index)),
                    })
                    .collect(),
                explanation: completed.then(|| q.explanation().to_string()),
            }
        });

        let navigator = (0..session.total())
            .map(|index| NavigatorCell {
                index,
                answered: session.selection_at(index).is_some(),
                current: index == current_index,
            })
            .collect();

        Self {
            generation: session.generation(),
            cohort_id,
            mode: session.mode(),
            phase: session.phase(),
            started: session.is_started(),
            completed,
            completion: session.completion_reason(),
            current_index,
            total: session.total(),
            remaining_secs: session
                .mode()
                .is_timed()
                .then(|| session.remaining_secs()),
            score: session.score(),
            answered: session.answered(),
            pending: session.pending(),
            question,
            navigator,
        }
    }

    #[must_use]
    pub fn has_question(&self) -> bool {
        self.question.is_some()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.total
    }

    /// Option text currently recorded for the displayed question.
    #[must_use]
    pub fn current_selection(&self) -> Option<&str> {
        self.question.as_ref().and_then(|q| {
            q.options
                .iter()
                .find(|option| option.selected)
                .map(|option| option.text.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{Question, QuestionDraft};
    use crate::time::fixed_now;

    fn questions() -> Arc<[Question]> {
        (1..=3)
            .map(|id| {
                QuestionDraft {
                    id: QuestionId::new(id),
                    prompt: format!("Prompt {id}"),
                    options: vec!["yes".into(), "no".into()],
                    answer: "yes".into(),
                    explanation: "Always yes.".into(),
                }
                .validate()
                .unwrap()
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn idle_snapshot_hides_answers() {
        let session = QuizSession::new(SessionGeneration::new(1), QuizMode::Practice, questions());
        let snap = QuizSnapshot::capture(CohortId::new(9), &session);

        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.remaining_secs, None);
        assert_eq!(snap.total, 3);
        assert_eq!(snap.pending, 3);
        let question = snap.question.unwrap();
        assert_eq!(question.prompt, "Prompt 1");
        assert!(question.explanation.is_none());
        assert!(question.options.iter().all(|o| o.correct.is_none() && !o.selected));
        assert!(snap.navigator[0].current);
    }

    #[test]
    fn completed_snapshot_reveals_correctness() {
        let mut session =
            QuizSession::new(SessionGeneration::new(2), QuizMode::Timed, questions());
        session.start(fixed_now());
        session.select("no");
        session.submit(fixed_now());

        let snap = QuizSnapshot::capture(CohortId::new(9), &session);
        assert!(snap.completed);
        assert_eq!(snap.remaining_secs, Some(0));
        assert_eq!(snap.completion, Some(CompletionReason::Submitted));
        assert_eq!(snap.current_selection(), Some("no"));

        let question = snap.question.unwrap();
        assert_eq!(question.explanation.as_deref(), Some("Always yes."));
        assert_eq!(question.options[0].correct, Some(true));
        assert_eq!(question.options[1].correct, Some(false));
        assert!(snap.navigator[0].answered);
        assert!(!snap.navigator[1].answered);
    }

    #[test]
    fn snapshot_serializes_for_the_display_layer() {
        let session = QuizSession::new(SessionGeneration::new(5), QuizMode::Timed, questions());
        let json = serde_json::to_value(QuizSnapshot::capture(CohortId::new(10), &session)).unwrap();
        assert_eq!(json["mode"], "timed");
        assert_eq!(json["phase"], "idle");
        assert_eq!(json["generation"], 5);
        assert_eq!(json["remaining_secs"], 90);
    }
}
